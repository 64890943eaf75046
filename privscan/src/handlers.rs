use clap::ArgMatches;
use colored::Colorize;
use privscan_core::wordlist::load_dictionary;
use privscan_core::{
    execute_scan, first_candidate_selector, interactive_selector, ScanOptions, ScanSummary,
};
use std::path::PathBuf;
use tracing::debug;

/// Expand a user-supplied output directory, resolving a leading tilde.
pub fn resolve_output_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub async fn handle_scan(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<String>("url").unwrap();
    let output_dir = resolve_output_dir(sub_matches.get_one::<String>("output-dir").unwrap());
    let valid = sub_matches.get_flag("valid");
    let wordlist_file = sub_matches.get_one::<PathBuf>("wordlist-file").unwrap();
    let first = sub_matches.get_flag("first");
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap();
    let quiet = sub_matches.get_flag("quiet");

    debug!("Scanning {} into {}", url, output_dir.display());

    let dictionary = if valid {
        match load_dictionary(wordlist_file) {
            Ok(words) => Some(words),
            Err(e) => {
                eprintln!("{} {:#}", "✗".red().bold(), e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let selector = if first {
        first_candidate_selector()
    } else {
        interactive_selector()
    };

    let options = ScanOptions {
        url: url.clone(),
        output_dir,
        dictionary,
        timeout_secs,
        show_progress: !quiet,
    };

    match execute_scan(options, selector).await {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("{} Scan failed: {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn print_summary(summary: &ScanSummary) {
    println!();
    match &summary.resources_file {
        Some(path) => println!(
            "{} {} external resource reference(s) -> {}",
            "✓".green().bold(),
            summary.external_resource_count,
            path.display().to_string().bright_white()
        ),
        None => println!("{} No external resources found", "→".blue()),
    }

    if let (Some(policy_url), Some(path)) = (&summary.policy_url, &summary.word_freq_file) {
        println!(
            "{} Privacy policy: {}",
            "✓".green().bold(),
            policy_url.bright_white()
        );
        println!(
            "{} {} distinct word(s) -> {}",
            "✓".green().bold(),
            summary.distinct_words,
            path.display().to_string().bright_white()
        );
    }
}
