/// Pure description of the session list shown in the popup

use crate::tab_data::Session;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub timestamp: i64,
    pub name: String,
    pub tab_count: usize,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionListView {
    pub rows: Vec<SessionRow>,
    pub is_empty: bool,
    pub total_tabs: usize,
}

/// "1 tab", "3 tabs"
pub fn tab_label(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "tab" } else { "tabs" })
}

/// Build the list view, newest session first.
///
/// Rebuilt from scratch on every change; `format_date` turns a creation
/// timestamp into the label shown under the session name.
pub fn render<F>(sessions: &[Session], format_date: F) -> SessionListView
where
    F: Fn(i64) -> String,
{
    let rows: Vec<SessionRow> = sessions
        .iter()
        .rev()
        .map(|session| SessionRow {
            timestamp: session.timestamp,
            name: session.name.clone(),
            tab_count: session.tab_count,
            subtitle: format!("{} • {}", tab_label(session.tab_count), format_date(session.timestamp)),
        })
        .collect();

    SessionListView {
        is_empty: rows.is_empty(),
        total_tabs: rows.iter().map(|r| r.tab_count).sum(),
        rows,
    }
}
