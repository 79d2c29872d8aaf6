/// Data structures mirroring the browser's tab, group and window objects
use serde::{Deserialize, Serialize};

/// Group id the browser reports for a tab that is not in any group
pub const TAB_GROUP_ID_NONE: i32 = -1;

pub type TabId = i32;
pub type GroupId = i32;
pub type WindowId = i32;

/// Loading state of a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Unloaded,
    Loading,
    Complete,
}

/// Information about a browser tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<TabStatus>,
    #[serde(default = "ungrouped")]
    pub group_id: GroupId,
    pub window_id: WindowId,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub active: bool,
}

fn ungrouped() -> GroupId {
    TAB_GROUP_ID_NONE
}

impl TabInfo {
    #[cfg(test)]
    pub fn new(id: TabId, window_id: WindowId, url: &str, title: &str) -> TabInfo {
        TabInfo {
            id,
            url: Some(url.to_string()),
            title: Some(title.to_string()),
            status: Some(TabStatus::Complete),
            group_id: TAB_GROUP_ID_NONE,
            window_id,
            index: 0,
            pinned: false,
            active: false,
        }
    }

    pub fn is_grouped(&self) -> bool {
        self.group_id != TAB_GROUP_ID_NONE
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Properties that changed in a `tabs.onUpdated` event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    #[serde(default)]
    pub status: Option<TabStatus>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ChangeInfo {
    #[cfg(test)]
    pub fn completed() -> ChangeInfo {
        ChangeInfo {
            status: Some(TabStatus::Complete),
            url: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == Some(TabStatus::Complete)
    }
}

/// A tab group as reported by `tabGroups.query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroup {
    pub id: GroupId,
    #[serde(default)]
    pub title: Option<String>,
    pub window_id: WindowId,
}

/// Display state of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
}

/// Properties passed to `windows.update`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_attention: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<WindowState>,
}

impl WindowUpdate {
    /// Focus only
    pub fn focus() -> WindowUpdate {
        WindowUpdate {
            focused: Some(true),
            ..WindowUpdate::default()
        }
    }

    /// Focus, flash for attention and maximize
    pub fn bring_to_front() -> WindowUpdate {
        WindowUpdate {
            focused: Some(true),
            draw_attention: Some(true),
            state: Some(WindowState::Maximized),
        }
    }
}

/// Filter passed to `tabs.query`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabQuery {
    pub url: Vec<String>,
}
