/// The slice of the browser's tabs/tabGroups/windows API this extension uses
use crate::error::HostError;
use crate::tab_data::{GroupId, TabGroup, TabId, TabInfo, TabQuery, WindowId, WindowUpdate};

/// Async access to the browser's tab registry.
///
/// Futures are not `Send`: everything runs on the extension's single JS
/// thread, so callers take `&impl TabHost` rather than trait objects.
#[allow(async_fn_in_trait)]
pub trait TabHost {
    /// Tabs whose URL matches any of the query's patterns
    async fn query_tabs(&self, query: &TabQuery) -> Result<Vec<TabInfo>, HostError>;

    /// Groups whose title matches `title`
    async fn query_groups(&self, title: &str) -> Result<Vec<TabGroup>, HostError>;

    /// Add tabs to `group_id`, or to a new group when `None`. Returns the group id.
    async fn group_tabs(&self, tab_ids: &[TabId], group_id: Option<GroupId>) -> Result<GroupId, HostError>;

    async fn update_group_title(&self, group_id: GroupId, title: &str) -> Result<(), HostError>;

    async fn activate_tab(&self, tab_id: TabId) -> Result<(), HostError>;

    async fn update_window(&self, window_id: WindowId, update: &WindowUpdate) -> Result<(), HostError>;
}
