use serde::{Deserialize, Serialize};

use crate::app::{GleanerError, Result};

/// Characters kept per page when the caller does not say otherwise.
pub const DEFAULT_MAX_CHARS_PER_PAGE: usize = 10_000;

/// Validated page and character budgets for one aggregation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchBudget {
    /// `None` fetches every candidate.
    pub max_pages: Option<usize>,
    pub max_chars_per_page: usize,
}

impl Default for FetchBudget {
    fn default() -> Self {
        Self {
            max_pages: None,
            max_chars_per_page: DEFAULT_MAX_CHARS_PER_PAGE,
        }
    }
}

impl FetchBudget {
    /// Validate signed wire values. Negative budgets are caller errors.
    pub fn from_wire(max_pages: Option<i64>, max_chars_per_page: Option<i64>) -> Result<Self> {
        let max_pages = max_pages
            .map(|n| non_negative("max_pages", n))
            .transpose()?;
        let max_chars_per_page = match max_chars_per_page {
            Some(n) => non_negative("max_chars_per_page", n)?,
            None => DEFAULT_MAX_CHARS_PER_PAGE,
        };

        Ok(Self {
            max_pages,
            max_chars_per_page,
        })
    }

    /// The prefix of `urls` that this budget allows to be fetched.
    pub fn select<'a>(&self, urls: &'a [String]) -> &'a [String] {
        match self.max_pages {
            Some(n) => &urls[..n.min(urls.len())],
            None => urls,
        }
    }
}

fn non_negative(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        GleanerError::InvalidInput(format!("{} must be non-negative, got {}", field, value))
    })
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub max_pages: Option<i64>,
    #[serde(default)]
    pub max_chars_per_page: Option<i64>,
}

impl SearchRequest {
    pub fn budget(&self) -> Result<FetchBudget> {
        FetchBudget::from_wire(self.max_pages, self.max_chars_per_page)
    }
}

/// Body of `POST /run`, the agent-service style entry point.
///
/// The query may arrive as `query`, `input`, or the content of the last
/// chat message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunRequest {
    pub query: Option<String>,
    pub input: Option<String>,
    pub messages: Vec<RunMessage>,
    pub max_pages: Option<i64>,
    pub max_chars_per_page: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunMessage {
    pub content: Option<String>,
}

impl RunRequest {
    /// First non-empty of `query`, `input`, last message content.
    pub fn resolve_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .into_iter()
            .chain(self.input.as_deref())
            .chain(self.messages.last().and_then(|m| m.content.as_deref()))
            .find(|q| !q.is_empty())
    }

    pub fn budget(&self) -> Result<FetchBudget> {
        FetchBudget::from_wire(self.max_pages, self.max_chars_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://example.com/{}", i)).collect()
    }

    #[test]
    fn test_budget_defaults() {
        let budget = FetchBudget::from_wire(None, None).unwrap();
        assert_eq!(budget, FetchBudget::default());
        assert_eq!(budget.max_chars_per_page, 10_000);
    }

    #[test]
    fn test_budget_rejects_negative_pages() {
        let err = FetchBudget::from_wire(Some(-1), None).unwrap_err();
        assert!(matches!(err, GleanerError::InvalidInput(_)));
        assert!(err.to_string().contains("max_pages"));
    }

    #[test]
    fn test_budget_rejects_negative_chars() {
        let err = FetchBudget::from_wire(None, Some(-5)).unwrap_err();
        assert!(matches!(err, GleanerError::InvalidInput(_)));
        assert!(err.to_string().contains("max_chars_per_page"));
    }

    #[test]
    fn test_budget_allows_zero() {
        let budget = FetchBudget::from_wire(Some(0), Some(0)).unwrap();
        assert_eq!(budget.max_pages, Some(0));
        assert_eq!(budget.max_chars_per_page, 0);
        assert!(budget.select(&urls(3)).is_empty());
    }

    #[test]
    fn test_select_takes_prefix_in_order() {
        let all = urls(3);
        let budget = FetchBudget {
            max_pages: Some(2),
            ..Default::default()
        };
        assert_eq!(budget.select(&all), &all[..2]);
    }

    #[test]
    fn test_select_budget_larger_than_list() {
        let all = urls(2);
        let budget = FetchBudget {
            max_pages: Some(10),
            ..Default::default()
        };
        assert_eq!(budget.select(&all).len(), 2);
        assert_eq!(FetchBudget::default().select(&all).len(), 2);
    }

    #[test]
    fn test_search_request_defaults() {
        let request: SearchRequest = serde_json::from_str(r#"{"query":"azure"}"#).unwrap();
        assert_eq!(request.max_pages, None);
        assert_eq!(request.budget().unwrap(), FetchBudget::default());
    }

    #[test]
    fn test_run_request_query_precedence() {
        let request: RunRequest =
            serde_json::from_str(r#"{"query":"q","input":"i","messages":[{"content":"m"}]}"#)
                .unwrap();
        assert_eq!(request.resolve_query(), Some("q"));

        let request: RunRequest =
            serde_json::from_str(r#"{"query":"","input":"i"}"#).unwrap();
        assert_eq!(request.resolve_query(), Some("i"));

        let request: RunRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"first"},{"role":"user","content":"last"}]}"#,
        )
        .unwrap();
        assert_eq!(request.resolve_query(), Some("last"));
    }

    #[test]
    fn test_run_request_without_query() {
        let request: RunRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.resolve_query(), None);

        let request: RunRequest = serde_json::from_str(r#"{"messages":[{}]}"#).unwrap();
        assert_eq!(request.resolve_query(), None);
    }
}
