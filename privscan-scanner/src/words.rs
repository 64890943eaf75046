use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

/// Maximal runs of word characters containing no digits. A token with a
/// digit anywhere ("5g") fails the boundary match entirely rather than
/// being split.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[\w--\d]+\b").unwrap());

/// Build a word frequency map from raw extracted text.
///
/// ASCII control characters (U+0001..U+001F) act as separators, the text is
/// lowercased, and tokens are counted. When a dictionary is supplied, only
/// tokens present in it (exact match) are kept.
pub fn generate_word_freq(
    text: &str,
    dictionary: Option<&HashSet<String>>,
) -> BTreeMap<String, u64> {
    let cleaned: String = text
        .chars()
        .map(|c| if ('\u{1}'..='\u{1f}').contains(&c) { ' ' } else { c })
        .collect();
    let cleaned = cleaned.to_lowercase();

    let mut freq = BTreeMap::new();
    for token in WORD_RE.find_iter(&cleaned) {
        let word = token.as_str();
        if let Some(dictionary) = dictionary {
            if !dictionary.contains(word) {
                continue;
            }
        }
        *freq.entry(word.to_string()).or_insert(0) += 1;
    }

    freq
}
