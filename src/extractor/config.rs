use serde::{Deserialize, Serialize};

/// Configuration for HTML text extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// CSS selectors for elements dropped, with their subtrees, before
    /// text extraction (scripts, navigation, frames, etc.)
    pub remove_selectors: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            remove_selectors: vec![
                "script".to_string(),
                "style".to_string(),
                "nav".to_string(),
                "footer".to_string(),
                "header".to_string(),
                "aside".to_string(),
                "iframe".to_string(),
            ],
        }
    }
}
