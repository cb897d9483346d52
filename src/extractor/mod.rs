//! Readable-text extraction from fetched HTML pages.
//!
//! # Architecture
//!
//! ```text
//! HTML body → parse → drop removed subtrees → text nodes → drop blank lines → truncate
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use gleaner::extractor::{ContentExtractor, ExtractorConfig};
//!
//! let extractor = ContentExtractor::new(&ExtractorConfig::default())?;
//! let text = extractor.extract("<html><body><p>Hello</p></body></html>", 10_000);
//! ```

mod config;

pub use config::ExtractorConfig;

use scraper::{ElementRef, Html, Node, Selector};

use crate::app::{GleanerError, Result};

/// Strips boilerplate elements from HTML and returns the visible text.
pub struct ContentExtractor {
    remove: Vec<Selector>,
}

impl ContentExtractor {
    /// Build an extractor, parsing every removal selector up front.
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let remove = config
            .remove_selectors
            .iter()
            .map(|s| {
                Selector::parse(s).map_err(|e| {
                    GleanerError::Config(format!("invalid remove selector '{}': {:?}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { remove })
    }

    /// Extract text from `html`, keeping at most `max_chars` characters.
    ///
    /// Each text node is trimmed and empty ones are skipped; the rest are
    /// joined with newlines and whitespace-only lines are dropped.
    pub fn extract(&self, html: &str, max_chars: usize) -> String {
        let document = Html::parse_document(html);

        let mut fragments = Vec::new();
        self.collect_text(document.root_element(), &mut fragments);

        let joined = fragments.join("\n");
        let text = joined
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        truncate_chars(text, max_chars)
    }

    fn collect_text<'a>(&self, element: ElementRef<'a>, out: &mut Vec<&'a str>) {
        if self.is_removed(&element) {
            return;
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        out.push(trimmed);
                    }
                }
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        self.collect_text(child_el, out);
                    }
                }
                _ => {}
            }
        }
    }

    fn is_removed(&self, element: &ElementRef<'_>) -> bool {
        self.remove.iter().any(|selector| selector.matches(element))
    }
}

/// Keep the first `max_chars` characters (not bytes) of `text`.
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ContentExtractor {
        ContentExtractor::new(&ExtractorConfig::default()).unwrap()
    }

    const ARTICLE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Release notes</title>
            <style>body { color: red; }</style>
            <script>var tracking = "should not appear";</script>
        </head>
        <body>
            <header><a href="/">Home</a></header>
            <nav><ul><li>Docs</li><li>Blog</li></ul></nav>
            <main>
                <h1>Version 2.0</h1>
                <p>First paragraph.</p>


                <p>Second   paragraph &amp; more.</p>
            </main>
            <aside>Related links</aside>
            <iframe src="https://ads.example.com"></iframe>
            <footer>Copyright</footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_extracts_visible_text() {
        let text = extractor().extract(ARTICLE, 10_000);
        assert_eq!(
            text,
            "Release notes\nVersion 2.0\nFirst paragraph.\nSecond   paragraph & more."
        );
    }

    #[test]
    fn test_removes_boilerplate() {
        let text = extractor().extract(ARTICLE, 10_000);
        for noise in ["tracking", "color: red", "Home", "Docs", "Related", "Copyright"] {
            assert!(!text.contains(noise), "found {:?} in {:?}", noise, text);
        }
    }

    #[test]
    fn test_drops_blank_lines_inside_text_nodes() {
        let html = "<html><body><pre>line one\n\n   \nline two</pre></body></html>";
        let text = extractor().extract(html, 10_000);
        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn test_truncates_to_char_budget() {
        let html = format!("<html><body><p>{}</p></body></html>", "a".repeat(50_000));
        let text = extractor().extract(&html, 10_000);
        assert_eq!(text.chars().count(), 10_000);
    }

    #[test]
    fn test_truncates_multibyte_by_chars() {
        let html = "<html><body><p>héllo wörld ✓✓✓</p></body></html>";
        let text = extractor().extract(html, 9);
        assert_eq!(text, "héllo wör");
        assert_eq!(text.chars().count(), 9);
    }

    #[test]
    fn test_zero_budget_yields_empty_text() {
        assert_eq!(extractor().extract(ARTICLE, 0), "");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extractor().extract("", 100), "");
    }

    #[test]
    fn test_custom_selectors() {
        let config = ExtractorConfig {
            remove_selectors: vec![".promo".to_string()],
        };
        let extractor = ContentExtractor::new(&config).unwrap();
        let html = r#"<html><body><div class="promo">Buy now</div><nav>Menu</nav></body></html>"#;
        assert_eq!(extractor.extract(html, 100), "Menu");
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let config = ExtractorConfig {
            remove_selectors: vec!["[[".to_string()],
        };
        let err = ContentExtractor::new(&config).err().unwrap();
        assert!(matches!(err, GleanerError::Config(_)));
    }

    #[test]
    fn test_truncate_chars_short_text_untouched() {
        assert_eq!(truncate_chars("abc".to_string(), 10), "abc");
        assert_eq!(truncate_chars("abc".to_string(), 3), "abc");
        assert_eq!(truncate_chars("abcd".to_string(), 3), "abc");
    }
}
