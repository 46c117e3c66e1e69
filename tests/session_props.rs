//! Property tests for the list/selection invariants of a search session.

use std::collections::HashSet;
use std::time::Duration;

use github_user_search::model::types::{ItemId, UserRecord};
use github_user_search::search::gateway::SearchFailure;
use github_user_search::session::{EditMode, SearchSession, SearchTicket};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Toggle(usize),
    ToggleAll,
    Edit,
    Done,
    Duplicate,
    Delete,
    Search(Vec<u64>),
    RateLimited,
    Failed,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..16).prop_map(Op::Toggle),
        1 => Just(Op::ToggleAll),
        2 => Just(Op::Edit),
        1 => Just(Op::Done),
        2 => Just(Op::Duplicate),
        1 => Just(Op::Delete),
        1 => prop::collection::vec(0u64..50, 0..6).prop_map(Op::Search),
        1 => Just(Op::RateLimited),
        1 => Just(Op::Failed),
    ]
}

fn user(id: u64) -> UserRecord {
    UserRecord {
        id: ItemId::Num(id),
        login: format!("user{id}"),
        avatar_url: String::new(),
        html_url: String::new(),
        kind: "User".into(),
        score: 1.0,
    }
}

fn issue(session: &mut SearchSession) -> u64 {
    match session.begin_search("q") {
        SearchTicket::Issued { seq, .. } => seq,
        SearchTicket::Cleared => unreachable!("non-blank query"),
    }
}

fn ids(session: &SearchSession) -> Vec<ItemId> {
    session.items().iter().map(|u| u.id.clone()).collect()
}

proptest! {
    #[test]
    fn invariants_hold_across_gestures(
        seed in prop::collection::hash_set(0u64..50, 0..6),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut session = SearchSession::new(Duration::from_millis(500));
        let seq = issue(&mut session);
        session.complete_search(seq, Ok(seed.iter().map(|&i| user(i)).collect()));

        for op in ops {
            let before = ids(&session);
            let selected_before: HashSet<ItemId> = session.selection().ids().clone();
            match op {
                Op::Toggle(i) => {
                    if let Some(id) = before.get(i).cloned() {
                        session.toggle(&id);
                    }
                }
                Op::ToggleAll => {
                    let was_full = selected_before.len() == before.len();
                    session.toggle_all();
                    if was_full {
                        prop_assert!(session.selection().is_empty());
                    } else {
                        prop_assert_eq!(session.selection().len(), before.len());
                    }
                }
                Op::Edit => {
                    let entered = session.enter_edit_mode();
                    prop_assert_eq!(entered, !before.is_empty());
                }
                Op::Done => {
                    session.done();
                    prop_assert_eq!(session.mode(), EditMode::Browsing);
                    prop_assert!(session.selection().is_empty());
                }
                Op::Duplicate => {
                    let created = session.duplicate_selected();
                    let after = ids(&session);
                    prop_assert_eq!(created.len(), selected_before.len());
                    prop_assert_eq!(after.len(), before.len() + selected_before.len());
                    prop_assert_eq!(&after[..before.len()], &before[..]);
                    for id in &created {
                        prop_assert!(!before.contains(id));
                    }
                }
                Op::Delete => {
                    session.delete_selected();
                    let expected: Vec<ItemId> = before
                        .iter()
                        .filter(|id| !selected_before.contains(*id))
                        .cloned()
                        .collect();
                    prop_assert_eq!(ids(&session), expected);
                    prop_assert!(session.selection().is_empty());
                    prop_assert_eq!(session.mode(), EditMode::Browsing);
                }
                Op::Search(raw) => {
                    let seq = issue(&mut session);
                    let unique: Vec<u64> = raw
                        .into_iter()
                        .collect::<HashSet<_>>()
                        .into_iter()
                        .collect();
                    session.complete_search(seq, Ok(unique.iter().map(|&i| user(i)).collect()));
                    prop_assert!(session.selection().is_empty());
                    prop_assert_eq!(session.mode(), EditMode::Browsing);
                }
                Op::RateLimited => {
                    let seq = issue(&mut session);
                    session.complete_search(seq, Err(SearchFailure::RateLimited {
                        message: "limit".into(),
                    }));
                    prop_assert_eq!(ids(&session), before);
                    session.dismiss_notice();
                }
                Op::Failed => {
                    let seq = issue(&mut session);
                    session.complete_search(seq, Err(SearchFailure::RequestFailed {
                        status: Some(500),
                        message: "boom".into(),
                    }));
                    prop_assert!(session.items().is_empty());
                    session.dismiss_notice();
                }
            }

            let now_ids = ids(&session);
            let unique: HashSet<&ItemId> = now_ids.iter().collect();
            prop_assert_eq!(unique.len(), now_ids.len(), "ids stay distinct");
            for id in session.selection().ids() {
                prop_assert!(now_ids.contains(id), "selection is a subset of the list");
            }
        }
    }
}
