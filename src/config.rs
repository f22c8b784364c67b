/// Compile-time settings for the popup

/// Storage key holding the session list
pub const SESSIONS_KEY: &str = "sessions";

/// Storage key holding the dark-mode preference
pub const DARK_MODE_KEY: &str = "darkMode";

/// Prefix for sessions saved without a name
pub const DEFAULT_NAME_PREFIX: &str = "Session";

pub const LOG_LEVEL: log::Level = log::Level::Info;

/// Name used when the user leaves the input blank
pub fn default_session_name(formatted_now: &str) -> String {
    format!("{} {}", DEFAULT_NAME_PREFIX, formatted_now)
}
