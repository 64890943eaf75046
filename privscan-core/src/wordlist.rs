use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default system word list on Debian-style systems.
pub const DEFAULT_WORDLIST_PATH: &str = "/usr/share/dict/words";

/// Load a newline-delimited word list into a lookup set. Entries are kept
/// verbatim (no case folding) - strict filtering is an exact match against
/// lowercased tokens.
pub fn load_dictionary(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list {}", path.display()))?;

    let words: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();

    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_dictionary() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dog").unwrap();
        writeln!(file, "cat").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  house  ").unwrap();

        let words = load_dictionary(file.path()).unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.contains("dog"));
        assert!(words.contains("house"));
    }

    #[test]
    fn test_load_dictionary_keeps_case() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Aaron").unwrap();

        let words = load_dictionary(file.path()).unwrap();
        assert!(words.contains("Aaron"));
        assert!(!words.contains("aaron"));
    }

    #[test]
    fn test_load_dictionary_missing_file() {
        let result = load_dictionary(Path::new("/definitely/not/a/wordlist.txt"));
        assert!(result.is_err());
    }
}
