use scraper::{Html, Selector};

/// Tags whose text never contributes to the visible-text approximation.
const NON_VISIBLE_TAGS: &[&str] = &[
    "html", "noscript", "header", "input", "script", "meta", "head",
];

/// Best-effort visible text of a page: the text content of every element
/// outside the non-visible set, joined with single spaces. Each retained
/// element contributes the text of its entire subtree.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let all_elements = Selector::parse("*").unwrap();

    let fragments: Vec<String> = document
        .select(&all_elements)
        .filter(|element| !NON_VISIBLE_TAGS.contains(&element.value().name()))
        .map(|element| element.text().collect::<String>())
        .collect();

    fragments.join(" ")
}
