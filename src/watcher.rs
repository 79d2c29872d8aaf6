/// Background handling of `tabs.onUpdated` events
use log::{debug, error, info};

use crate::config::ExtensionConfig;
use crate::domain::extract_hostname;
use crate::error::HostError;
use crate::host::TabHost;
use crate::resolver::resolve_group;
use crate::tab_data::{ChangeInfo, GroupId, TabId, TabInfo, WindowId, WindowUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotComplete,
    AlreadyGrouped,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    Ignored(IgnoreReason),
    Grouped { group_id: GroupId, title: String },
}

/// Why an event can be dropped without looking at the configuration
pub fn skip_reason(change: &ChangeInfo, tab: &TabInfo) -> Option<IgnoreReason> {
    if !change.is_complete() {
        Some(IgnoreReason::NotComplete)
    } else if tab.is_grouped() {
        Some(IgnoreReason::AlreadyGrouped)
    } else {
        None
    }
}

/// Group a freshly loaded tab if its host has a rule.
///
/// Only acts when the tab has finished loading and is not in a group yet, so
/// later navigations inside a grouped tab do nothing.
pub async fn handle_tab_updated<H: TabHost>(
    host: &H,
    config: &ExtensionConfig,
    tab_id: TabId,
    change: &ChangeInfo,
    tab: &TabInfo,
) -> Result<WatchOutcome, HostError> {
    if let Some(reason) = skip_reason(change, tab) {
        return Ok(WatchOutcome::Ignored(reason));
    }

    let Some(hostname) = tab.url.as_deref().and_then(extract_hostname) else {
        return Ok(WatchOutcome::Ignored(IgnoreReason::NoMatch));
    };
    let Some(rule) = config.rule_for_host(&hostname) else {
        return Ok(WatchOutcome::Ignored(IgnoreReason::NoMatch));
    };

    let group_id = resolve_group(host, &rule.title, tab_id).await?;

    if rule.bring_to_front {
        bring_to_front(host, tab_id, tab.window_id).await?;
    }

    Ok(WatchOutcome::Grouped {
        group_id,
        title: rule.title.clone(),
    })
}

/// Activate the tab, then focus, flash and maximize its window
pub async fn bring_to_front<H: TabHost>(host: &H, tab_id: TabId, window_id: WindowId) -> Result<(), HostError> {
    host.activate_tab(tab_id).await?;
    host.update_window(window_id, &WindowUpdate::bring_to_front()).await
}

/// Event-listener entry point: runs the handler and logs the result.
///
/// Never fails, so a bad event cannot take the listener down. A tab or
/// group that vanished mid-way is expected and only logged at debug level.
pub async fn dispatch_tab_updated<H: TabHost>(
    host: &H,
    config: &ExtensionConfig,
    tab_id: TabId,
    change: &ChangeInfo,
    tab: &TabInfo,
) {
    match handle_tab_updated(host, config, tab_id, change, tab).await {
        Ok(WatchOutcome::Grouped { group_id, title }) => {
            info!("tab {} grouped into {} ({:?})", tab_id, group_id, title);
        }
        Ok(WatchOutcome::Ignored(reason)) => {
            debug!("tab {} ignored: {:?}", tab_id, reason);
        }
        Err(e) if e.is_missing() => {
            debug!("tab {} abandoned: {}", tab_id, e);
        }
        Err(e) => {
            error!("failed to group tab {}: {}", tab_id, e);
        }
    }
}
