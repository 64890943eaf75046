use crate::output::write_json_artifact;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use privscan_scanner::policy::find_policy_links;
use privscan_scanner::text::extract_visible_text;
use privscan_scanner::words::generate_word_freq;
use privscan_scanner::{Fetcher, ResourceClassifier};
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const EXTERNAL_RESOURCES_FILE: &str = "external_resources.json";
pub const WORD_FREQUENCY_FILE: &str = "privacy_policy_word_frequency.json";

/// Options for a single scan run
pub struct ScanOptions {
    /// Address of the page to scan (scheme optional)
    pub url: String,
    /// Directory the JSON artifacts are written to; must exist
    pub output_dir: PathBuf,
    /// When set, word counting keeps only words present in this set
    pub dictionary: Option<HashSet<String>>,
    pub timeout_secs: u64,
    /// Show a spinner during network fetches
    pub show_progress: bool,
}

/// What a scan run produced
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Resolved address of the scanned page
    pub source_url: String,
    pub external_resource_count: usize,
    pub resources_file: Option<PathBuf>,
    /// Chosen privacy policy address, if one was found
    pub policy_url: Option<String>,
    pub distinct_words: usize,
    pub word_freq_file: Option<PathBuf>,
}

/// Chooses among multiple privacy-policy candidates; returns a 0-based index.
pub type PolicySelector = Arc<dyn Fn(&[String]) -> usize + Send + Sync>;

/// Headless default: always take the first candidate.
pub fn first_candidate_selector() -> PolicySelector {
    Arc::new(|_candidates: &[String]| 0)
}

/// Prompt on stdin with a numbered list, re-prompting until a valid 1-based
/// selection is entered. Invalid and out-of-range input both report and loop.
pub fn interactive_selector() -> PolicySelector {
    Arc::new(|candidates: &[String]| loop {
        println!("Please select which page to scrape:");
        for (i, link) in candidates.iter().enumerate() {
            println!("  {}: {}", i + 1, link);
        }
        print!("Option: ");
        io::stdout().flush().unwrap();

        let mut response = String::new();
        io::stdin().read_line(&mut response).unwrap();
        let response = response.trim();

        match response.parse::<usize>() {
            Ok(option) if (1..=candidates.len()).contains(&option) => return option - 1,
            _ => println!("Invalid option {}, please select again.", response),
        }
    })
}

/// Run the full pipeline: fetch the page, bucket its externally hosted
/// resources, locate the linked privacy policy page and write a word
/// frequency count of its visible text.
///
/// Artifacts are only written when there is something to write: no resources
/// file for a page without external resources, no frequency file when no
/// policy link was found (a normal terminal state, reported on stdout).
pub async fn execute_scan(options: ScanOptions, selector: PolicySelector) -> Result<ScanSummary> {
    if !options.output_dir.is_dir() {
        bail!("{} is not a valid directory", options.output_dir.display());
    }

    let progress = if options.show_progress {
        Some(spinner())
    } else {
        None
    };

    let fetcher = Fetcher::with_timeout(options.timeout_secs);

    if let Some(pb) = &progress {
        pb.set_message(format!("Fetching {}...", options.url));
    }
    let page = fetcher.get(&options.url).await?;
    page.ensure_accessible()?;

    let mut summary = ScanSummary {
        source_url: page.url.clone(),
        ..Default::default()
    };

    if let Some(pb) = &progress {
        pb.set_message("Classifying resources...");
    }
    let classifier = ResourceClassifier::new();
    let resources = classifier.classify(&page.body, &page.url);
    summary.external_resource_count = resources.values().map(Vec::len).sum();

    if !resources.is_empty() {
        let path = options.output_dir.join(EXTERNAL_RESOURCES_FILE);
        write_json_artifact(&resources, &path, "External resources")?;
        summary.resources_file = Some(path);
    } else {
        debug!("No external resources found on {}", page.url);
    }

    let candidates = find_policy_links(&page.body, &page.url);
    let target_url = match candidates.len() {
        0 => {
            if let Some(pb) = &progress {
                pb.finish_and_clear();
            }
            println!("No privacy policy page found @ {}", options.url);
            return Ok(summary);
        }
        1 => candidates[0].clone(),
        _ => {
            let index = match &progress {
                Some(pb) => pb.suspend(|| selector(&candidates)),
                None => selector(&candidates),
            };
            candidates
                .get(index)
                .cloned()
                .context("Selector returned an out-of-range candidate index")?
        }
    };
    summary.policy_url = Some(target_url.clone());

    if let Some(pb) = &progress {
        pb.set_message(format!("Fetching {}...", target_url));
    }
    let policy_page = fetcher.get(&target_url).await?;

    let text = extract_visible_text(&policy_page.body);
    let word_freq = generate_word_freq(&text, options.dictionary.as_ref());
    summary.distinct_words = word_freq.len();

    let path = options.output_dir.join(WORD_FREQUENCY_FILE);
    write_json_artifact(&word_freq, &path, "Privacy policy word frequency")?;
    summary.word_freq_file = Some(path);

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    Ok(summary)
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
