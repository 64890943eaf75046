// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::resolve_output_dir;

// Re-export scan functionality from privscan-core
pub use privscan_core::scan::{
    execute_scan, first_candidate_selector, interactive_selector, PolicySelector, ScanOptions,
    ScanSummary,
};
