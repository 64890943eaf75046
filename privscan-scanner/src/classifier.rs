use scraper::{Html, Selector};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Extension to resource-type table, checked in declaration order.
const EXTENSION_TYPES: &[(&str, &str)] = &[
    (".css", "stylesheet"),
    ("rss.xml", "rss_feed"),
    (".js", "script"),
    (".png", "icon"),
];

const FONT_EXTENSIONS: &[&str] = &[".woff", ".woff2", ".ttf", ".otf", ".eot"];

/// Static classification tables. Owned by the classifier rather than living
/// as module globals, so callers can substitute their own.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub extension_types: Vec<(String, String)>,
    pub font_extensions: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            extension_types: EXTENSION_TYPES
                .iter()
                .map(|(ext, res_type)| (ext.to_string(), res_type.to_string()))
                .collect(),
            font_extensions: FONT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// Buckets externally-hosted resource references by inferred type.
pub struct ResourceClassifier {
    config: ClassifierConfig,
}

impl ResourceClassifier {
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Walk every element of the document and bucket external resource
    /// references. `link` elements bucket under their inferred resource type,
    /// everything else under its own tag name. Addresses keep document order
    /// within a bucket.
    pub fn classify(&self, html: &str, page_url: &str) -> BTreeMap<String, Vec<String>> {
        let document = Html::parse_document(html);
        let page_origin = netloc(page_url);
        let all_elements = Selector::parse("*").unwrap();

        let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for element in document.select(&all_elements) {
            let tag = element.value().name();
            let Some(reference) = element
                .value()
                .attr("src")
                .or_else(|| element.value().attr("href"))
            else {
                continue;
            };

            if !is_external_reference(tag, reference, page_origin.as_deref()) {
                continue;
            }

            let bucket = if tag == "link" {
                self.guess_resource_type(reference).to_string()
            } else {
                tag.to_string()
            };

            buckets.entry(bucket).or_default().push(reference.to_string());
        }

        debug!(
            "Classified {} external references on {}",
            buckets.values().map(Vec::len).sum::<usize>(),
            page_url
        );

        buckets
    }

    /// Infer a resource type from a reference's file extension, falling back
    /// to a font check (extension or "font" anywhere in the address) and then
    /// to the generic "link" label.
    pub fn guess_resource_type(&self, reference: &str) -> &str {
        let reference = reference.to_lowercase();

        for (ext, res_type) in &self.config.extension_types {
            if reference.ends_with(ext.as_str()) {
                return res_type;
            }
        }

        if self
            .config
            .font_extensions
            .iter()
            .any(|ext| reference.ends_with(ext.as_str()))
            || reference.contains("font")
        {
            return "font";
        }

        "link"
    }
}

impl Default for ResourceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// An element is external iff its reference carries a network location that
/// differs from the page's, and the element is not an anchor. Anchors are
/// navigation, not embedded resources.
pub fn is_external_reference(tag_name: &str, reference: &str, page_origin: Option<&str>) -> bool {
    if tag_name == "a" {
        return false;
    }

    match netloc(reference) {
        Some(origin) => Some(origin.as_str()) != page_origin,
        None => false,
    }
}

/// Syntactic network location of an address: host plus explicit port.
/// Absolute and protocol-relative references have one; relative paths and
/// scheme-less addresses like "www.example.es/a" do not.
pub(crate) fn netloc(address: &str) -> Option<String> {
    let parsed = match Url::parse(address) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) if address.starts_with("//") => {
            Url::parse(&format!("https:{}", address)).ok()?
        }
        Err(_) => return None,
    };

    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.some-random-url.es/1651651fhjksd.dfhudhiosuf.w";

    fn page_origin() -> Option<String> {
        netloc(PAGE_URL)
    }

    #[test]
    fn test_cross_origin_reference_is_external() {
        assert!(is_external_reference(
            "foo",
            "https://static.files.co.uk/orbi/9dc2b29require.min.js",
            page_origin().as_deref(),
        ));
    }

    #[test]
    fn test_same_origin_reference_is_not_external() {
        assert!(!is_external_reference(
            "foo",
            "https://www.some-random-url.es/orbi/6456.lkl/878.img",
            page_origin().as_deref(),
        ));
    }

    #[test]
    fn test_relative_reference_is_not_external() {
        assert!(!is_external_reference("foo", "/assets/site.css", page_origin().as_deref()));
        assert!(!is_external_reference("foo", "", page_origin().as_deref()));
    }

    #[test]
    fn test_anchor_is_never_external() {
        assert!(!is_external_reference(
            "a",
            "https://static.files.co.uk/orbi/9dc2b29reque.mi",
            page_origin().as_deref(),
        ));
        assert!(!is_external_reference(
            "a",
            "https://www.some-random-url.es/orbi/9dc2b29reque.mi",
            page_origin().as_deref(),
        ));
    }

    #[test]
    fn test_protocol_relative_reference_is_external() {
        assert!(is_external_reference(
            "script",
            "//cdn.example.com/app.js",
            page_origin().as_deref(),
        ));
    }

    #[test]
    fn test_netloc_keeps_explicit_port() {
        assert_eq!(
            netloc("http://127.0.0.1:4444/page"),
            Some("127.0.0.1:4444".to_string())
        );
        assert_eq!(netloc("https://example.com/page"), Some("example.com".to_string()));
        assert_eq!(netloc("/relative/path"), None);
        assert_eq!(netloc("www.example.es/contacts"), None);
    }

    #[test]
    fn test_guess_resource_type_extension_table() {
        let classifier = ResourceClassifier::new();
        assert_eq!(classifier.guess_resource_type("https://cdn.x.com/site.css"), "stylesheet");
        assert_eq!(classifier.guess_resource_type("https://cdn.x.com/feed/rss.xml"), "rss_feed");
        assert_eq!(classifier.guess_resource_type("https://cdn.x.com/app.JS"), "script");
        assert_eq!(classifier.guess_resource_type("https://cdn.x.com/logo.png"), "icon");
    }

    #[test]
    fn test_guess_resource_type_fonts() {
        let classifier = ResourceClassifier::new();
        assert_eq!(classifier.guess_resource_type("https://cdn.x.com/sans.woff2"), "font");
        assert_eq!(
            classifier.guess_resource_type("https://fonts.example.com/loader"),
            "font"
        );
    }

    #[test]
    fn test_guess_resource_type_fallback() {
        let classifier = ResourceClassifier::new();
        assert_eq!(classifier.guess_resource_type("https://cdn.x.com/manifest"), "link");
    }

    #[test]
    fn test_classify_buckets_by_tag_and_inferred_type() {
        let html = r#"
        <html>
        <head>
            <link rel="stylesheet" href="https://cdn.example.com/site.css">
            <link rel="alternate" href="https://cdn.example.com/feed/rss.xml">
            <script src="https://static.example.com/app.js"></script>
            <link rel="stylesheet" href="/local.css">
        </head>
        <body>
            <img src="https://images.example.com/hero.jpg">
            <a href="https://elsewhere.example.com/about">About</a>
        </body>
        </html>
        "#;

        let classifier = ResourceClassifier::new();
        let buckets = classifier.classify(html, "https://www.mysite.com/");

        assert_eq!(
            buckets.get("stylesheet"),
            Some(&vec!["https://cdn.example.com/site.css".to_string()])
        );
        assert_eq!(
            buckets.get("rss_feed"),
            Some(&vec!["https://cdn.example.com/feed/rss.xml".to_string()])
        );
        assert_eq!(
            buckets.get("script"),
            Some(&vec!["https://static.example.com/app.js".to_string()])
        );
        assert_eq!(
            buckets.get("img"),
            Some(&vec!["https://images.example.com/hero.jpg".to_string()])
        );
        // Same-origin and anchor references never land in a bucket
        assert!(!buckets.values().flatten().any(|addr| addr.contains("local.css")));
        assert!(!buckets.values().flatten().any(|addr| addr.contains("elsewhere")));
    }

    #[test]
    fn test_classify_empty_when_nothing_external() {
        let html = r#"
        <html>
        <body>
            <p>Plain text only</p>
            <img src="/local/hero.jpg">
        </body>
        </html>
        "#;

        let classifier = ResourceClassifier::new();
        let buckets = classifier.classify(html, "https://www.mysite.com/");
        assert!(buckets.is_empty());
    }
}
