/// Tab capture and restore against the browser tab API

use crate::error::{Result, SessionError};
use crate::tab_data::{SavedTab, Session, TabInfo};
use async_trait::async_trait;

/// Host tab API (chrome.tabs)
#[async_trait(?Send)]
pub trait TabHost {
    /// Tabs of the current window, in the host's order
    async fn query_current_window(&self) -> Result<Vec<TabInfo>>;

    async fn create_tab(&self, url: &str, active: bool) -> Result<()>;
}

/// Capture every tab in the current window. Nothing is filtered or deduplicated.
pub async fn capture_current_window_tabs<T: TabHost + ?Sized>(host: &T) -> Result<Vec<SavedTab>> {
    let tabs = host.query_current_window().await?;
    Ok(tabs.into_iter().map(SavedTab::from).collect())
}

/// Reopen a session's tabs in the background, one at a time.
///
/// Each creation is awaited before the next one starts. The first failure
/// stops the restore; tabs opened before it stay open.
pub async fn restore_session<T: TabHost + ?Sized>(host: &T, session: &Session) -> Result<usize> {
    let total = session.tabs.len();

    for (opened, tab) in session.tabs.iter().enumerate() {
        log::debug!("Restoring tab {}/{}: {}", opened + 1, total, tab.url);

        if let Err(e) = host.create_tab(&tab.url, false).await {
            log::error!(
                "Restore of '{}' stopped after {} of {} tabs: {}",
                session.name, opened, total, e
            );
            return Err(SessionError::Tabs(format!(
                "opened {} of {} tabs: {}",
                opened, total, e
            )));
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTabs;

    fn two_tabs() -> Vec<TabInfo> {
        vec![
            TabInfo::new("A", "https://a.test"),
            TabInfo::new("B", "https://b.test"),
        ]
    }

    #[tokio::test]
    async fn test_capture_preserves_order() {
        let host = FakeTabs::with_tabs(two_tabs());

        let captured = capture_current_window_tabs(&host).await.unwrap();

        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].title, "A");
        assert_eq!(captured[1].url, "https://b.test");
    }

    #[tokio::test]
    async fn test_capture_keeps_duplicates_and_special_pages() {
        let host = FakeTabs::with_tabs(vec![
            TabInfo::new("A", "https://a.test"),
            TabInfo::new("A", "https://a.test"),
            TabInfo::new("Extensions", "chrome://extensions/"),
        ]);

        let captured = capture_current_window_tabs(&host).await.unwrap();

        assert_eq!(captured.len(), 3);
        assert_eq!(captured[2].url, "chrome://extensions/");
    }

    #[tokio::test]
    async fn test_capture_failure() {
        let host = FakeTabs::with_tabs(two_tabs());
        host.fail_query(true);

        let result = capture_current_window_tabs(&host).await;

        assert!(matches!(result, Err(SessionError::Tabs(_))));
    }

    #[tokio::test]
    async fn test_restore_opens_inactive_tabs_in_order() {
        let host = FakeTabs::new();
        let session = Session::new(
            "Two".to_string(),
            1,
            two_tabs().into_iter().map(SavedTab::from).collect(),
        );

        let opened = restore_session(&host, &session).await.unwrap();

        assert_eq!(opened, 2);
        assert_eq!(
            host.created(),
            vec![
                ("https://a.test".to_string(), false),
                ("https://b.test".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_restore_partial_failure_is_not_rolled_back() {
        let host = FakeTabs::new();
        host.fail_create_at(1);
        let session = Session::new(
            "Three".to_string(),
            1,
            vec![
                SavedTab { title: "A".to_string(), url: "https://a.test".to_string() },
                SavedTab { title: "B".to_string(), url: "https://b.test".to_string() },
                SavedTab { title: "C".to_string(), url: "https://c.test".to_string() },
            ],
        );

        let result = restore_session(&host, &session).await;

        assert!(matches!(result, Err(SessionError::Tabs(_))));
        assert_eq!(host.created(), vec![("https://a.test".to_string(), false)]);
    }

    #[tokio::test]
    async fn test_restore_empty_session() {
        let host = FakeTabs::new();
        let session = Session::new("Empty".to_string(), 1, Vec::new());

        assert_eq!(restore_session(&host, &session).await.unwrap(), 0);
        assert!(host.created().is_empty());
    }
}
