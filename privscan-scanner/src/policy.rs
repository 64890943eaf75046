use crate::classifier::netloc;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

/// Anchor text marker, matched case-insensitively with spaces removed.
const POLICY_NEEDLE: &str = "privacypolicy";

/// Collect candidate privacy-policy addresses from the document's anchors.
/// Candidates are domain-qualified where needed and deduplicated, keeping
/// first-seen document order. Anchors without an href are skipped.
pub fn find_policy_links(html: &str, source_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").unwrap();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for element in document.select(&anchors) {
        let text: String = element.text().collect();
        if !text.to_lowercase().replace(' ', "").contains(POLICY_NEEDLE) {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let address = add_domain_if_required(href, source_url);
        if seen.insert(address.clone()) {
            candidates.push(address);
        }
    }

    debug!("Found {} privacy policy candidate(s) on {}", candidates.len(), source_url);
    candidates
}

/// Qualify a relative address with the source page's domain.
///
/// An address needs qualification iff it has no network location AND
/// prefixing it with "https://" still yields none - i.e. it is a relative
/// path, not merely scheme-less. Addresses like "www.example.es/a" already
/// carry a domain and pass through unchanged.
pub fn add_domain_if_required(address: &str, source_url: &str) -> String {
    if netloc(address).is_some() || netloc(&format!("https://{}", address)).is_some() {
        return address.to_string();
    }

    let source_domain = netloc(source_url)
        .or_else(|| netloc(&format!("https://{}", source_url)))
        .unwrap_or_default();

    let slash = if address.starts_with('/') { "" } else { "/" };
    format!("{}{}{}", source_domain, slash, address)
}
