/// Data structures for Tab Sessions
use serde::{Deserialize, Deserializer, Serialize};

/// A tab as reported by the host for the current window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl TabInfo {
    pub fn new(title: &str, url: &str) -> TabInfo {
        TabInfo {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

/// A saved tab within a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedTab {
    pub title: String,
    pub url: String,
}

impl From<TabInfo> for SavedTab {
    fn from(tab: TabInfo) -> Self {
        SavedTab {
            title: tab.title,
            url: tab.url,
        }
    }
}

/// A named snapshot of the tabs in a window.
///
/// `timestamp` is the creation time in milliseconds and doubles as the
/// session's identity; it survives renames. `tab_count` is captured once
/// at creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub name: String,
    #[serde(deserialize_with = "deserialize_millis")]
    pub timestamp: i64,
    pub tabs: Vec<SavedTab>,
    pub tab_count: usize,
}

impl Session {
    pub fn new(name: String, timestamp: i64, tabs: Vec<SavedTab>) -> Session {
        let tab_count = tabs.len();
        Session {
            name,
            timestamp,
            tabs,
            tab_count,
        }
    }
}

// JS hosts hand numbers back as doubles
fn deserialize_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(ms) = value.as_i64() {
        return Ok(ms);
    }
    match value.as_f64() {
        Some(ms) if ms.fract() == 0.0 && ms.abs() < i64::MAX as f64 => Ok(ms as i64),
        _ => Err(serde::de::Error::custom(format!("invalid timestamp: {}", value))),
    }
}
