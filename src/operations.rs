/// Popup operations: listing, sorting, focusing and grouping matched tabs

use log::{info, warn};

use crate::collate::locale_compare;
use crate::config::PopupConfig;
use crate::domain::{display_path, display_title};
use crate::error::HostError;
use crate::host::TabHost;
use crate::match_pattern::MatchPattern;
use crate::tab_data::{GroupId, TabId, TabInfo, TabQuery, WindowId, WindowUpdate};

/// One row in the popup list
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub tab_id: TabId,
    pub window_id: WindowId,
    pub title: String,
    pub path: String,
}

impl ListEntry {
    pub fn from_tab(tab: &TabInfo, path_prefix: &str) -> ListEntry {
        ListEntry {
            tab_id: tab.id,
            window_id: tab.window_id,
            title: display_title(tab.title_or_empty()).to_string(),
            path: display_path(tab.url.as_deref().unwrap_or(""), path_prefix),
        }
    }
}

/// Sort tabs by title in the user's locale order
pub fn sort_tabs_by_title(tabs: &mut [TabInfo]) {
    tabs.sort_by(|a, b| locale_compare(a.title_or_empty(), b.title_or_empty()));
}

/// Snapshot of the tabs matching the popup's URL patterns, sorted for display
///
/// The browser rejects a whole query over one bad pattern, so invalid
/// patterns are logged and left out. Tabs whose URL the browser withholds
/// (no host permission) are dropped.
pub async fn list_matching_tabs<H: TabHost>(host: &H, popup: &PopupConfig) -> Result<Vec<ListEntry>, HostError> {
    let patterns: Vec<MatchPattern> = popup
        .url_patterns
        .iter()
        .filter_map(|p| match MatchPattern::parse(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("skipping popup pattern: {}", e);
                None
            }
        })
        .collect();
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let query = TabQuery {
        url: patterns.iter().map(|p| p.as_str().to_string()).collect(),
    };
    let mut tabs = host.query_tabs(&query).await?;
    tabs.retain(|tab| {
        tab.url
            .as_deref()
            .is_some_and(|url| patterns.iter().any(|p| p.matches(url)))
    });
    sort_tabs_by_title(&mut tabs);

    Ok(tabs
        .iter()
        .map(|tab| ListEntry::from_tab(tab, &popup.path_prefix))
        .collect())
}

/// Make the tab active and focus its window
pub async fn focus_tab<H: TabHost>(host: &H, tab_id: TabId, window_id: WindowId) -> Result<(), HostError> {
    host.activate_tab(tab_id).await?;
    host.update_window(window_id, &WindowUpdate::focus()).await
}

/// Put every listed tab into one new group titled `title`.
///
/// Existing groups with the same title are not looked up. Returns `None`
/// without touching the host when there is nothing to group.
pub async fn group_listed_tabs<H: TabHost>(
    host: &H,
    tab_ids: &[TabId],
    title: &str,
) -> Result<Option<GroupId>, HostError> {
    if tab_ids.is_empty() {
        return Ok(None);
    }

    let group_id = host.group_tabs(tab_ids, None).await?;
    host.update_group_title(group_id, title).await?;
    info!("grouped {} tabs into {} ({:?})", tab_ids.len(), group_id, title);
    Ok(Some(group_id))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    fn create_test_tab(id: TabId, url: &str, title: &str) -> TabInfo {
        TabInfo::new(id, 1, url, title)
    }

    fn docs_host() -> FakeHost {
        let host = FakeHost::new();
        host.add_tab(create_test_tab(
            1,
            "https://developer.chrome.com/docs/webstore/publish",
            "Bravo | Chrome for Developers",
        ));
        host.add_tab(create_test_tab(
            2,
            "https://developer.chrome.com/docs/extensions/mv3/intro",
            "Álvaro | Chrome for Developers",
        ));
        host.add_tab(create_test_tab(
            3,
            "https://developer.chrome.com/docs/extensions/reference/tabs",
            "Charlie",
        ));
        host.add_tab(create_test_tab(4, "https://developer.chrome.com/blog/", "Alpha blog"));
        host.add_tab(create_test_tab(5, "https://github.com/", "Aardvark"));
        host
    }

    #[test]
    fn test_sort_tabs_by_title() {
        let mut tabs = vec![
            create_test_tab(1, "https://a", "Bravo"),
            create_test_tab(2, "https://b", "Álvaro"),
            create_test_tab(3, "https://c", "Charlie"),
        ];

        sort_tabs_by_title(&mut tabs);

        let titles: Vec<&str> = tabs.iter().map(|t| t.title_or_empty()).collect();
        assert_eq!(titles, vec!["Álvaro", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_list_entry_from_tab() {
        let tab = create_test_tab(
            7,
            "https://developer.chrome.com/docs/extensions/mv3/intro",
            "Overview of Manifest V3 | Chrome for Developers",
        );

        let entry = ListEntry::from_tab(&tab, "/docs");

        assert_eq!(entry.tab_id, 7);
        assert_eq!(entry.window_id, 1);
        assert_eq!(entry.title, "Overview of Manifest V3");
        assert_eq!(entry.path, "/extensions/mv3/intro");
    }

    #[tokio::test]
    async fn test_list_matching_tabs() {
        let host = docs_host();

        let entries = list_matching_tabs(&host, &PopupConfig::default()).await.unwrap();

        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Álvaro", "Bravo", "Charlie"]);
        assert_eq!(entries[0].path, "/extensions/mv3/intro");
        assert_eq!(entries[1].path, "/webstore/publish");
    }

    #[tokio::test]
    async fn test_list_matching_tabs_skips_invalid_patterns() {
        let host = docs_host();
        let popup = PopupConfig {
            url_patterns: vec![
                "not a pattern".to_string(),
                "https://developer.chrome.com/docs/webstore/*".to_string(),
            ],
            ..PopupConfig::default()
        };

        let entries = list_matching_tabs(&host, &popup).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tab_id, 1);
    }

    #[tokio::test]
    async fn test_list_matching_tabs_without_valid_patterns() {
        let host = docs_host();
        let popup = PopupConfig {
            url_patterns: vec!["nope".to_string()],
            ..PopupConfig::default()
        };

        let entries = list_matching_tabs(&host, &popup).await.unwrap();

        assert!(entries.is_empty());
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_matching_tabs_empty() {
        let host = FakeHost::new();

        let entries = list_matching_tabs(&host, &PopupConfig::default()).await.unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_focus_tab() {
        let host = docs_host();

        focus_tab(&host, 3, 1).await.unwrap();

        assert!(host.tab(3).unwrap().active);
        assert!(!host.tab(1).unwrap().active);
        assert!(host.window(1).unwrap().focused);
        assert!(!host.window(1).unwrap().draw_attention);
    }

    #[tokio::test]
    async fn test_focus_closed_tab() {
        let host = docs_host();
        host.close_tab(3);

        let err = focus_tab(&host, 3, 1).await.unwrap_err();

        assert_eq!(err, HostError::TabNotFound(3));
    }

    #[tokio::test]
    async fn test_group_listed_tabs_from_different_groups() {
        let host = docs_host();
        host.add_group(10, "A", &[1]);
        host.add_group(11, "B", &[2]);

        let group_id = group_listed_tabs(&host, &[1, 2], "DOCS").await.unwrap().unwrap();

        assert_eq!(host.group_members(group_id), vec![1, 2]);
        assert_eq!(host.groups_titled("DOCS").len(), 1);
        assert!(host.groups_titled("A").is_empty());
        assert!(host.groups_titled("B").is_empty());
    }

    #[tokio::test]
    async fn test_group_listed_tabs_does_not_merge_with_same_title() {
        let host = docs_host();
        host.add_group(10, "DOCS", &[3]);

        let group_id = group_listed_tabs(&host, &[1, 2], "DOCS").await.unwrap().unwrap();

        assert_ne!(group_id, 10);
        assert_eq!(host.groups_titled("DOCS").len(), 2);
    }

    #[tokio::test]
    async fn test_group_listed_tabs_empty() {
        let host = docs_host();

        let result = group_listed_tabs(&host, &[], "DOCS").await.unwrap();

        assert_eq!(result, None);
        assert!(host.calls().is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_sort_tabs_by_title_with_intl_collator() {
        let mut tabs = vec![
            TabInfo::new(1, 1, "https://a", "Bravo"),
            TabInfo::new(2, 1, "https://b", "Álvaro"),
            TabInfo::new(3, 1, "https://c", "E\u{301}mile"),
            TabInfo::new(4, 1, "https://d", "Charlie"),
        ];

        sort_tabs_by_title(&mut tabs);

        let ids: Vec<TabId> = tabs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);
    }
}
