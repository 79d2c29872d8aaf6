/// Error types for host calls and configuration
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::tab_data::{GroupId, TabId, WindowId};

/// Failure reported by the browser's tabs/tabGroups/windows API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("no tab with id {0}")]
    TabNotFound(TabId),
    #[error("no group with id {0}")]
    GroupNotFound(GroupId),
    #[error("no window with id {0}")]
    WindowNotFound(WindowId),
    #[error("host api error: {0}")]
    Api(String),
    #[error("failed to convert host value: {0}")]
    Serde(String),
}

impl HostError {
    /// Classify a rejection message from the browser.
    ///
    /// Chrome rejects calls on vanished objects with messages such as
    /// `No tab with id: 12.`; those become the matching not-found variant.
    pub fn from_message(message: &str) -> HostError {
        static MISSING: OnceLock<Regex> = OnceLock::new();
        let re = MISSING.get_or_init(|| {
            Regex::new(r"No (tab|group|window) with id: (-?\d+)").expect("valid regex")
        });

        if let Some(caps) = re.captures(message) {
            if let Ok(id) = caps[2].parse::<i32>() {
                return match &caps[1] {
                    "tab" => HostError::TabNotFound(id),
                    "group" => HostError::GroupNotFound(id),
                    _ => HostError::WindowNotFound(id),
                };
            }
        }

        HostError::Api(message.to_string())
    }

    /// The object the call referred to no longer exists.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            HostError::TabNotFound(_) | HostError::GroupNotFound(_) | HostError::WindowNotFound(_)
        )
    }
}

impl From<serde_wasm_bindgen::Error> for HostError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        HostError::Serde(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rule host must not be empty")]
    EmptyHost,
    #[error("group title must not be empty")]
    EmptyTitle,
    #[error("a rule for host {0} already exists")]
    DuplicateHost(String),
    #[error("invalid url pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("storage error: {0}")]
    Storage(String),
}
