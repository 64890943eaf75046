pub mod output;
pub mod scan;
pub mod wordlist;

pub use scan::{
    execute_scan, first_candidate_selector, interactive_selector, PolicySelector, ScanOptions,
    ScanSummary,
};
