//! Plain-text projections of session state, shared by the TUI, headless
//! mode and the one-shot `search` command.

use crate::session::{EditMode, HeaderView, RowView, SearchSession};

/// Header strip: "Edit" offer while browsing, selection controls while editing.
pub fn header_text(header: HeaderView) -> String {
    match header.mode {
        EditMode::Browsing if header.can_edit => "✎ Edit".to_string(),
        EditMode::Browsing => String::new(),
        EditMode::Editing => {
            let mut parts = vec![format!(
                "{} Select All",
                if header.all_selected { "◉" } else { "○" }
            )];
            if header.selected > 0 {
                parts.push(format!("{} selected", header.selected));
            }
            if header.bulk_actions {
                parts.push("[duplicate] [delete]".to_string());
            }
            parts.push("Done".to_string());
            parts.join("  ")
        }
    }
}

pub fn checkbox(row: &RowView<'_>) -> Option<&'static str> {
    match row.edit_mode {
        EditMode::Editing if row.is_selected => Some("[✓]"),
        EditMode::Editing => Some("[ ]"),
        EditMode::Browsing => None,
    }
}

/// One result row: checkbox (edit mode only), id, login, tag, score.
pub fn row_text(row: &RowView<'_>) -> String {
    let item = row.item;
    let body = format!(
        "{:<12} {:<24} {:<12} {:>8.3}",
        item.id.to_string(),
        item.login,
        item.kind,
        item.score
    );
    match checkbox(row) {
        Some(mark) => format!("{mark} {body}"),
        None => body,
    }
}

/// Text rendering of the whole screen (minus the input line).
pub fn render_plain(session: &SearchSession) -> String {
    let mut out = String::new();
    let header = header_text(session.header());
    if !header.is_empty() {
        out.push_str(&header);
        out.push('\n');
    }
    let mut any = false;
    for row in session.rows() {
        any = true;
        out.push_str(&row_text(&row));
        out.push('\n');
    }
    if !any {
        out.push_str(session.empty_state().message());
        out.push('\n');
    }
    if let Some(notice) = session.notice() {
        out.push_str(&format!("{}: {}\n", notice.title(), notice.body()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{ItemId, UserRecord};
    use crate::session::SearchTicket;

    fn session_with(ids: &[u64]) -> SearchSession {
        let mut session = SearchSession::default();
        if let SearchTicket::Issued { seq, .. } = session.begin_search("q") {
            let items = ids
                .iter()
                .map(|&id| UserRecord {
                    id: ItemId::Num(id),
                    login: format!("u{id}"),
                    avatar_url: String::new(),
                    html_url: String::new(),
                    kind: "User".into(),
                    score: 0.5,
                })
                .collect();
            session.complete_search(seq, Ok(items));
        }
        session
    }

    #[test]
    fn empty_prompt_before_any_query() {
        let session = SearchSession::default();
        assert_eq!(render_plain(&session), "Search for GitHub users\n");
    }

    #[test]
    fn no_results_after_query() {
        let session = session_with(&[]);
        assert_eq!(render_plain(&session), "No users found\n");
    }

    #[test]
    fn browsing_offers_edit_and_hides_checkboxes() {
        let session = session_with(&[1]);
        let text = render_plain(&session);
        assert!(text.starts_with("✎ Edit\n"));
        assert!(!text.contains("[ ]"));
        assert!(text.contains("u1"));
    }

    #[test]
    fn editing_shows_counts_and_actions() {
        let mut session = session_with(&[1, 2]);
        session.enter_edit_mode();
        assert_eq!(header_text(session.header()), "○ Select All  Done");

        session.toggle(&ItemId::Num(1));
        let text = render_plain(&session);
        assert!(text.contains("1 selected"));
        assert!(text.contains("[duplicate] [delete]"));
        assert!(text.contains("[✓] 1 "));
        assert!(text.contains("[ ] 2 "));
    }
}
