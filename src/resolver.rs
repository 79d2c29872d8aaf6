/// Find-or-create a tab group by title
use log::{debug, info};

use crate::error::HostError;
use crate::host::TabHost;
use crate::tab_data::{GroupId, TabId};

/// Put `tab_id` into a group titled `title`, creating the group if needed.
///
/// The browser's title query is pattern based, so only exact title matches
/// count. When several groups share the title the lowest id wins. Host
/// failures are returned unchanged; nothing is retried.
pub async fn resolve_group<H: TabHost>(host: &H, title: &str, tab_id: TabId) -> Result<GroupId, HostError> {
    let existing = host
        .query_groups(title)
        .await?
        .into_iter()
        .filter(|g| g.title.as_deref() == Some(title))
        .map(|g| g.id)
        .min();

    match existing {
        Some(group_id) => {
            debug!("adding tab {} to existing group {} ({:?})", tab_id, group_id, title);
            host.group_tabs(&[tab_id], Some(group_id)).await
        }
        None => {
            let group_id = host.group_tabs(&[tab_id], None).await?;
            host.update_group_title(group_id, title).await?;
            info!("created group {} ({:?}) for tab {}", group_id, title, tab_id);
            Ok(group_id)
        }
    }
}
