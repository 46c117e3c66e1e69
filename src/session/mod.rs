//! Screen session: the debounced query, the request sequence guard, the
//! result list and the selection, wired together.
//!
//! - **[`store`]**: ordered result list with local duplicate/delete.
//! - **[`selection`]**: selected ids and the browse/edit mode machine.
//!
//! Everything here is presentation-agnostic; a view reads [`SearchSession`]
//! through [`SearchSession::rows`], [`SearchSession::header`],
//! [`SearchSession::empty_state`] and [`SearchSession::notice`], and feeds
//! input back through plain method calls.

pub mod selection;
pub mod store;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::model::types::{ItemId, UserRecord};
use crate::search::debounce::QueryDebouncer;
use crate::search::gateway::{SearchFailure, SearchGateway};

pub use selection::{EditMode, SelectionController};
pub use store::ResultListStore;

/// Modal message raised by a failed search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    RateLimited,
    RequestFailed,
}

impl Notice {
    pub fn title(self) -> &'static str {
        match self {
            Notice::RateLimited => "Rate Limit Exceeded",
            Notice::RequestFailed => "Error",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            Notice::RateLimited => {
                "You've reached the GitHub API rate limit. Please try again later."
            }
            Notice::RequestFailed => "Failed to fetch users. Please try again.",
        }
    }
}

impl From<&SearchFailure> for Notice {
    fn from(failure: &SearchFailure) -> Self {
        match failure {
            SearchFailure::RateLimited { .. } => Notice::RateLimited,
            SearchFailure::RequestFailed { .. } => Notice::RequestFailed,
        }
    }
}

/// What the caller has to do after committing a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchTicket {
    /// Blank query; the list was cleared locally and nothing goes out.
    Cleared,
    /// Run `query` and report back with `seq`.
    Issued { seq: u64, query: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued meanwhile; the outcome was dropped.
    Stale,
}

/// Per-item render request.
#[derive(Clone, Copy, Debug)]
pub struct RowView<'a> {
    pub item: &'a UserRecord,
    pub is_selected: bool,
    pub edit_mode: EditMode,
}

/// What to show when the list has no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    NoResults,
    Prompt,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::Loading => "Searching…",
            EmptyState::NoResults => "No users found",
            EmptyState::Prompt => "Search for GitHub users",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderView {
    pub mode: EditMode,
    /// "Edit" is offered (browsing with a non-empty list).
    pub can_edit: bool,
    pub selected: usize,
    pub total: usize,
    pub all_selected: bool,
    /// Duplicate/delete are offered.
    pub bulk_actions: bool,
}

#[derive(Debug)]
pub struct SearchSession {
    debouncer: QueryDebouncer,
    store: ResultListStore,
    selection: SelectionController,
    latest_seq: u64,
    loading: bool,
    committed_query: String,
    notice: Option<Notice>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(crate::search::debounce::DEFAULT_DEBOUNCE)
    }
}

impl SearchSession {
    pub fn new(debounce: Duration) -> Self {
        Self::with_store(debounce, ResultListStore::new())
    }

    pub fn with_store(debounce: Duration, store: ResultListStore) -> Self {
        Self {
            debouncer: QueryDebouncer::new(debounce),
            store,
            selection: SelectionController::new(),
            latest_seq: 0,
            loading: false,
            committed_query: String::new(),
            notice: None,
        }
    }

    // ---------------------------------------------------------------------
    // Query input
    // ---------------------------------------------------------------------

    pub fn input(&mut self, raw: &str, now: Instant) {
        self.debouncer.input(raw, now);
    }

    pub fn poll_debounce(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now)
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Unmount: no pending query fires after this.
    pub fn close(&mut self) {
        self.debouncer.cancel();
    }

    // ---------------------------------------------------------------------
    // Search lifecycle
    // ---------------------------------------------------------------------

    /// Commit `query`. Every call supersedes whatever is still in flight.
    pub fn begin_search(&mut self, query: &str) -> SearchTicket {
        let query = query.trim();
        self.latest_seq += 1;
        if query.is_empty() {
            self.loading = false;
            self.committed_query.clear();
            self.clear_results();
            return SearchTicket::Cleared;
        }
        self.loading = true;
        self.committed_query = query.to_string();
        debug!(seq = self.latest_seq, query = query, "search issued");
        SearchTicket::Issued {
            seq: self.latest_seq,
            query: query.to_string(),
        }
    }

    /// Apply the outcome of request `seq` unless a newer one was issued.
    pub fn complete_search(
        &mut self,
        seq: u64,
        outcome: Result<Vec<UserRecord>, SearchFailure>,
    ) -> Completion {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "dropping stale search outcome");
            return Completion::Stale;
        }
        self.loading = false;
        match outcome {
            Ok(items) => self.replace_results(items),
            Err(failure) => {
                self.notice = Some(Notice::from(&failure));
                if !failure.keeps_results() {
                    self.clear_results();
                }
            }
        }
        Completion::Applied
    }

    /// Commit and run a query synchronously through `gateway`.
    pub fn search_now(&mut self, gateway: &SearchGateway, query: &str) -> Completion {
        match self.begin_search(query) {
            SearchTicket::Cleared => Completion::Applied,
            SearchTicket::Issued { seq, query } => {
                let outcome = gateway.search(&query);
                self.complete_search(seq, outcome)
            }
        }
    }

    fn replace_results(&mut self, items: Vec<UserRecord>) {
        self.store.replace(items);
        self.selection.reset();
    }

    fn clear_results(&mut self) {
        self.store.clear();
        self.selection.reset();
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ---------------------------------------------------------------------
    // Edit gestures
    // ---------------------------------------------------------------------

    pub fn items(&self) -> &[UserRecord] {
        self.store.items()
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn mode(&self) -> EditMode {
        self.selection.mode()
    }

    pub fn enter_edit_mode(&mut self) -> bool {
        self.selection.enter_edit_mode(self.store.len())
    }

    pub fn done(&mut self) {
        self.selection.done();
    }

    /// Ignored for ids that are not listed.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn toggle_all(&mut self) {
        let total = self.store.len();
        self.selection.toggle_all(self.store.ids(), total);
    }

    pub fn duplicate_selected(&mut self) -> Vec<ItemId> {
        self.store.duplicate_selected(self.selection.ids())
    }

    /// Remove the selected rows, clear the selection and stop editing.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self.store.delete_selected(self.selection.ids());
        self.selection.done();
        removed
    }

    // ---------------------------------------------------------------------
    // View projections
    // ---------------------------------------------------------------------

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        let mode = self.selection.mode();
        self.store.items().iter().map(move |item| RowView {
            item,
            is_selected: self.selection.is_selected(&item.id),
            edit_mode: mode,
        })
    }

    pub fn empty_state(&self) -> EmptyState {
        if self.loading {
            EmptyState::Loading
        } else if !self.committed_query.is_empty() {
            EmptyState::NoResults
        } else {
            EmptyState::Prompt
        }
    }

    pub fn header(&self) -> HeaderView {
        let selected = self.selection.len();
        let total = self.store.len();
        let mode = self.selection.mode();
        HeaderView {
            mode,
            can_edit: !self.selection.is_editing() && total > 0,
            selected,
            total,
            all_selected: selected == total,
            bulk_actions: self.selection.is_editing() && selected > 0,
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> UserRecord {
        UserRecord {
            id: ItemId::Num(id),
            login: format!("user{id}"),
            avatar_url: String::new(),
            html_url: format!("https://github.com/user{id}"),
            kind: "User".into(),
            score: 1.0,
        }
    }

    fn loaded(ids: &[u64]) -> SearchSession {
        let mut session = SearchSession::with_store(
            Duration::from_millis(500),
            ResultListStore::with_session_start(42),
        );
        let SearchTicket::Issued { seq, .. } = session.begin_search("user") else {
            panic!("expected issued ticket");
        };
        session.complete_search(seq, Ok(ids.iter().map(|&i| user(i)).collect()));
        session
    }

    #[test]
    fn blank_query_clears_without_request() {
        let mut session = loaded(&[1, 2]);
        assert_eq!(session.begin_search("  "), SearchTicket::Cleared);
        assert!(session.items().is_empty());
        assert!(!session.is_loading());
        assert_eq!(session.empty_state(), EmptyState::Prompt);
    }

    #[test]
    fn success_resets_selection_and_mode() {
        let mut session = loaded(&[1, 2, 3]);
        session.enter_edit_mode();
        session.toggle(&ItemId::Num(1));

        let SearchTicket::Issued { seq, .. } = session.begin_search("other") else {
            panic!("expected issued ticket");
        };
        assert!(session.is_loading());
        session.complete_search(seq, Ok(vec![user(9)]));
        assert_eq!(session.mode(), EditMode::Browsing);
        assert!(session.selection().is_empty());
        assert_eq!(session.items().len(), 1);
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn rate_limit_keeps_results() {
        let mut session = loaded(&[1, 2]);
        let SearchTicket::Issued { seq, .. } = session.begin_search("again") else {
            panic!("expected issued ticket");
        };
        session.complete_search(
            seq,
            Err(SearchFailure::RateLimited {
                message: "slow down".into(),
            }),
        );
        assert_eq!(session.items().len(), 2);
        assert_eq!(session.take_notice(), Some(Notice::RateLimited));
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn request_failure_clears_results() {
        let mut session = loaded(&[1, 2]);
        let SearchTicket::Issued { seq, .. } = session.begin_search("again") else {
            panic!("expected issued ticket");
        };
        session.complete_search(
            seq,
            Err(SearchFailure::RequestFailed {
                status: Some(500),
                message: "boom".into(),
            }),
        );
        assert!(session.items().is_empty());
        assert_eq!(session.notice(), Some(Notice::RequestFailed));
        assert_eq!(session.empty_state(), EmptyState::NoResults);
    }

    #[test]
    fn stale_outcome_is_dropped() {
        let mut session = loaded(&[]);
        let SearchTicket::Issued { seq: slow, .. } = session.begin_search("a") else {
            panic!("expected issued ticket");
        };
        let SearchTicket::Issued { seq: fast, .. } = session.begin_search("ab") else {
            panic!("expected issued ticket");
        };
        assert_eq!(session.complete_search(fast, Ok(vec![user(2)])), Completion::Applied);
        assert_eq!(session.complete_search(slow, Ok(vec![user(1)])), Completion::Stale);
        assert_eq!(session.items()[0].id, ItemId::Num(2));
        assert!(!session.is_loading());
    }

    #[test]
    fn blank_query_supersedes_in_flight_request() {
        let mut session = loaded(&[]);
        let SearchTicket::Issued { seq, .. } = session.begin_search("a") else {
            panic!("expected issued ticket");
        };
        session.begin_search("");
        assert_eq!(session.complete_search(seq, Ok(vec![user(1)])), Completion::Stale);
        assert!(session.items().is_empty());
    }

    #[test]
    fn duplicate_scenario_from_three_items() {
        let mut session = loaded(&[1, 2, 3]);
        session.enter_edit_mode();
        session.toggle(&ItemId::Num(1));
        session.toggle(&ItemId::Num(2));
        let created = session.duplicate_selected();
        assert_eq!(created.len(), 2);
        let items = session.items();
        assert_eq!(items.len(), 5);
        assert_eq!(items[3].login, "user1");
        assert_eq!(items[4].login, "user2");
        assert!(created.iter().all(|id| !matches!(id, ItemId::Num(_))));
        // duplicates are not selected themselves
        assert_eq!(session.selection().len(), 2);
    }

    #[test]
    fn toggle_all_on_fully_selected_list_clears() {
        let mut session = loaded(&[1, 2, 3]);
        session.enter_edit_mode();
        session.toggle_all();
        assert!(session.header().all_selected);
        assert_eq!(session.selection().len(), 3);
        session.toggle_all();
        assert!(session.selection().is_empty());
    }

    #[test]
    fn delete_exits_edit_mode() {
        let mut session = loaded(&[1, 2, 3]);
        session.enter_edit_mode();
        session.toggle(&ItemId::Num(2));
        assert_eq!(session.delete_selected(), 1);
        assert_eq!(session.mode(), EditMode::Browsing);
        assert!(session.selection().is_empty());
        let ids: Vec<&ItemId> = session.items().iter().map(|u| &u.id).collect();
        assert_eq!(ids, vec![&ItemId::Num(1), &ItemId::Num(3)]);
    }

    #[test]
    fn toggle_ignores_unknown_ids() {
        let mut session = loaded(&[1]);
        assert!(!session.toggle(&ItemId::Num(77)));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn header_and_rows_follow_mode() {
        let mut session = loaded(&[1, 2]);
        let header = session.header();
        assert!(header.can_edit);
        assert!(!header.bulk_actions);

        session.enter_edit_mode();
        session.toggle(&ItemId::Num(2));
        let header = session.header();
        assert!(!header.can_edit);
        assert!(header.bulk_actions);
        assert_eq!(header.selected, 1);

        let rows: Vec<(bool, EditMode)> =
            session.rows().map(|r| (r.is_selected, r.edit_mode)).collect();
        assert_eq!(
            rows,
            vec![(false, EditMode::Editing), (true, EditMode::Editing)]
        );
    }

    #[test]
    fn close_cancels_pending_query() {
        let t0 = Instant::now();
        let mut session = SearchSession::default();
        assert_eq!(session.debounce_delay(), Duration::from_millis(500));
        session.input("octo", t0);
        assert!(session.debounce_deadline().is_some());
        session.close();
        assert_eq!(session.poll_debounce(t0 + Duration::from_secs(5)), None);
    }
}
