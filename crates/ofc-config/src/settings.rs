use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tracing filter used when neither `RUST_LOG` nor `logging.filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Replacement texts for the blocking notifications. `None` keeps the built-in text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeOverrides {
    pub corrective: Option<String>,
    pub confirmed: Option<String>,
    pub verify_first: Option<String>,
}

/// Typed view over a merged config document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub log_filter: String,
    pub notices: NoticeOverrides,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            notices: NoticeOverrides::default(),
        }
    }
}

impl FormConfig {
    /// Missing or mistyped keys fall back to defaults.
    pub fn from_json(config_json: &Value) -> Self {
        let text = |ptr: &str| {
            config_json
                .pointer(ptr)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        Self {
            log_filter: text("/logging/filter")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            notices: NoticeOverrides {
                corrective: text("/notices/corrective"),
                confirmed: text("/notices/confirmed"),
                verify_first: text("/notices/verify_first"),
            },
        }
    }
}
