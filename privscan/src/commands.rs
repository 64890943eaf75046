use crate::CLAP_STYLING;
use clap::{arg, command};
use privscan_core::wordlist::DEFAULT_WORDLIST_PATH;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("privscan")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("privscan")
        .styles(CLAP_STYLING)
        .subcommand_required(true)
        .subcommand(
            command!("scan")
                .about(
                    "Scan a page for externally hosted resources and build a word frequency \
                count of its privacy policy",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("Address of the page to scan (scheme optional)"),
                )
                .arg(
                    arg!(-o --"output-dir" <DIR>)
                        .required(false)
                        .help("Directory where the JSON artifacts are written")
                        .default_value("."),
                )
                .arg(
                    arg!(--"valid" "Keep only words found in an English word list")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-w --"wordlist-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited word list, used with --valid")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value(DEFAULT_WORDLIST_PATH),
                )
                .arg(
                    arg!(--"first" "Take the first candidate when several privacy policy links are found")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-q --"quiet" "Suppress progress output")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
