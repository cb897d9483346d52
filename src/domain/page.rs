use serde::{Deserialize, Serialize};

/// Outcome of fetching one candidate URL.
///
/// Either `content` is present and `success` is true, or `error` is present
/// and `success` is false. The only constructors are [`FetchResult::fetched`]
/// and [`FetchResult::failed`], and deserialization rejects payloads that
/// break the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireFetchResult")]
pub struct FetchResult {
    url: String,
    content: Option<String>,
    success: bool,
    error: Option<String>,
}

impl FetchResult {
    pub fn fetched(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: Some(content.into()),
            success: true,
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: None,
            success: false,
            error: Some(error.into()),
        }
    }

    /// The URL exactly as it was requested.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[derive(Deserialize)]
struct WireFetchResult {
    url: String,
    #[serde(default)]
    content: Option<String>,
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<WireFetchResult> for FetchResult {
    type Error = String;

    fn try_from(wire: WireFetchResult) -> Result<Self, Self::Error> {
        match (wire.success, wire.content, wire.error) {
            (true, Some(content), None) => Ok(Self::fetched(wire.url, content)),
            (false, None, Some(error)) => Ok(Self::failed(wire.url, error)),
            (success, content, error) => Err(format!(
                "inconsistent page result for {}: success={}, content {}, error {}",
                wire.url,
                success,
                if content.is_some() { "present" } else { "absent" },
                if error.is_some() { "present" } else { "absent" },
            )),
        }
    }
}

/// Aggregate response for one search-and-fetch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAndFetchResult {
    /// The original query, passed through unchanged.
    pub query: String,
    /// One entry per fetched URL, in input order.
    pub pages: Vec<FetchResult>,
    /// Number of candidate URLs before the page budget was applied.
    pub total_found: usize,
    /// Number of pages with `success == true`.
    pub total_fetched: usize,
}

impl SearchAndFetchResult {
    pub fn new(query: impl Into<String>, pages: Vec<FetchResult>, total_found: usize) -> Self {
        let total_fetched = pages.iter().filter(|p| p.is_success()).count();
        Self {
            query: query.into(),
            pages,
            total_found,
            total_fetched,
        }
    }

    pub fn total_failed(&self) -> usize {
        self.pages.len() - self.total_fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_has_content_and_no_error() {
        let page = FetchResult::fetched("https://example.com", "hello");
        assert!(page.is_success());
        assert_eq!(page.content(), Some("hello"));
        assert!(page.error().is_none());
    }

    #[test]
    fn test_failed_has_error_and_no_content() {
        let page = FetchResult::failed("https://example.com", "HTTP 500");
        assert!(!page.is_success());
        assert!(page.content().is_none());
        assert_eq!(page.error(), Some("HTTP 500"));
    }

    #[test]
    fn test_failed_serializes_nulls() {
        let page = FetchResult::failed("https://example.com", "timed out");
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://example.com",
                "content": null,
                "success": false,
                "error": "timed out"
            })
        );
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_page() {
        let json = r#"{"url":"https://example.com","content":"x","success":false,"error":null}"#;
        assert!(serde_json::from_str::<FetchResult>(json).is_err());

        let json = r#"{"url":"https://example.com","content":null,"success":true,"error":null}"#;
        assert!(serde_json::from_str::<FetchResult>(json).is_err());
    }

    #[test]
    fn test_deserialize_accepts_failed_page() {
        let json = r#"{"url":"https://a.test","content":null,"success":false,"error":"boom"}"#;
        let page: FetchResult = serde_json::from_str(json).unwrap();
        assert_eq!(page, FetchResult::failed("https://a.test", "boom"));
    }

    #[test]
    fn test_totals_count_successes() {
        let result = SearchAndFetchResult::new(
            "rust",
            vec![
                FetchResult::fetched("https://a.test", "a"),
                FetchResult::failed("https://b.test", "boom"),
                FetchResult::fetched("https://c.test", "c"),
            ],
            5,
        );
        assert_eq!(result.total_found, 5);
        assert_eq!(result.total_fetched, 2);
        assert_eq!(result.total_failed(), 1);
    }
}
