//! Tests for panel transitions

use super::*;
use crate::api::ApiError;
use proptest::prelude::*;

fn network_error() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

fn sentences(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sent_id(transition: &Transition) -> RequestId {
    match &transition.effect {
        Some(Effect::Send { id, .. }) => *id,
        other => panic!("expected a Send effect, got {:?}", other),
    }
}

fn with_query(query: &str) -> PanelState {
    reduce(PanelState::new(), Action::QueryChanged(query.to_string())).state
}

/// Submit a search for `query` and complete it with `results`
fn searched(query: &str, results: &[&str]) -> PanelState {
    let transition = reduce(with_query(query), Action::SubmitSearch);
    let id = sent_id(&transition);
    reduce(
        transition.state,
        Action::SearchCompleted {
            id,
            result: Ok(sentences(results)),
        },
    )
    .state
}

#[test]
fn test_initial_state() {
    let state = PanelState::new();
    assert_eq!(state.mode, Mode::Idle);
    assert!(state.results.is_empty());
    assert_eq!(state.result_count, 0);
    assert!(!state.has_searched);
    assert!(state.error.is_none());
    assert!(!state.is_busy());
}

#[test]
fn test_query_changes_are_stored() {
    let state = with_query("cat");
    assert_eq!(state.query, "cat");
}

#[test]
fn test_submit_search_sends_request() {
    let transition = reduce(with_query("cat"), Action::SubmitSearch);

    assert_eq!(
        transition.effect,
        Some(Effect::Send {
            id: 1,
            command: Command::Search {
                query: "cat".to_string()
            },
        })
    );
    assert_eq!(transition.state.busy_with(), Some(CommandKind::Search));
}

#[test]
fn test_blank_query_sends_nothing() {
    let transition = reduce(with_query("   "), Action::SubmitSearch);
    assert_eq!(transition.effect, None);
    assert!(!transition.state.is_busy());
}

#[test]
fn test_search_success_with_three_results() {
    let state = searched("cat", &["a cat", "the cat", "cats"]);

    assert_eq!(state.result_count, 3);
    assert_eq!(state.results.len(), 3);
    assert!(state.error.is_none());
    assert!(state.has_searched);
    assert_eq!(state.mode, Mode::ShowingResults);
    assert!(!state.is_busy());
}

#[test]
fn test_search_failure_clears_results_and_sets_error() {
    let state = searched("cat", &["a cat"]);
    let transition = reduce(state, Action::SubmitSearch);
    let id = sent_id(&transition);

    let state = reduce(
        transition.state,
        Action::SearchCompleted {
            id,
            result: Err(network_error()),
        },
    )
    .state;

    assert!(state.results.is_empty());
    assert_eq!(state.result_count, 0);
    assert_eq!(state.error.as_deref(), Some(SEARCH_ERROR));
    assert!(state.has_searched);
    assert_eq!(state.mode, Mode::ShowingResults);
}

#[test]
fn test_successful_search_clears_previous_error() {
    let transition = reduce(with_query("cat"), Action::SubmitSearch);
    let id = sent_id(&transition);
    let failed = reduce(
        transition.state,
        Action::SearchCompleted {
            id,
            result: Err(network_error()),
        },
    )
    .state;
    assert!(failed.error.is_some());

    let transition = reduce(failed, Action::SubmitSearch);
    let id = sent_id(&transition);
    let state = reduce(
        transition.state,
        Action::SearchCompleted {
            id,
            result: Ok(sentences(&["cat"])),
        },
    )
    .state;

    assert!(state.error.is_none());
    assert_eq!(state.result_count, 1);
}

#[test]
fn test_no_results_notice() {
    let state = searched("zebra", &[]);
    assert!(state.shows_no_results_notice());

    let state = searched("cat", &["cat"]);
    assert!(!state.shows_no_results_notice());

    assert!(!PanelState::new().shows_no_results_notice());
}

#[test]
fn test_stale_search_response_is_ignored() {
    let first = reduce(with_query("ca"), Action::SubmitSearch);
    let stale_id = sent_id(&first);
    let second = reduce(
        reduce(first.state, Action::QueryChanged("cat".to_string())).state,
        Action::SubmitSearch,
    );
    let current_id = sent_id(&second);
    assert_ne!(stale_id, current_id);

    let after_stale = reduce(
        second.state.clone(),
        Action::SearchCompleted {
            id: stale_id,
            result: Ok(sentences(&["stale"])),
        },
    )
    .state;
    assert_eq!(after_stale, second.state);

    let state = reduce(
        after_stale,
        Action::SearchCompleted {
            id: current_id,
            result: Ok(sentences(&["fresh"])),
        },
    )
    .state;
    assert_eq!(state.results, sentences(&["fresh"]));
}

#[test]
fn test_response_without_request_is_ignored() {
    let state = searched("cat", &["cat"]);
    let after = reduce(
        state.clone(),
        Action::SearchCompleted {
            id: 99,
            result: Ok(Vec::new()),
        },
    )
    .state;
    assert_eq!(after, state);
}

#[test]
fn test_open_replace_from_results() {
    let state = searched("cat", &["cat"]);
    let transition = reduce(state, Action::OpenReplace);
    assert_eq!(transition.state.mode, Mode::ReplaceForm);
    assert_eq!(transition.effect, None);
}

#[test]
fn test_open_replace_needs_results_view() {
    let transition = reduce(with_query("cat"), Action::OpenReplace);
    assert_eq!(transition.state.mode, Mode::Idle);
}

#[test]
fn test_open_replace_cancels_running_search() {
    let state = searched("cat", &["cat"]);
    let running = reduce(state, Action::SubmitSearch).state;
    assert!(running.is_busy());

    let transition = reduce(running, Action::OpenReplace);

    assert_eq!(transition.effect, Some(Effect::CancelInFlight));
    assert!(!transition.state.is_busy());
    assert_eq!(transition.state.mode, Mode::ReplaceForm);
}

#[test]
fn test_query_is_frozen_outside_search_views() {
    let state = reduce(searched("cat", &["cat"]), Action::OpenReplace).state;
    let state = reduce(state, Action::QueryChanged("dog".to_string())).state;
    assert_eq!(state.query, "cat");

    let transition = reduce(state, Action::SubmitSearch);
    assert_eq!(transition.effect, None);
}

#[test]
fn test_replace_sends_old_and_new_word() {
    let state = reduce(searched("colour", &["colour"]), Action::OpenReplace).state;
    let state = reduce(state, Action::NewWordChanged("color".to_string())).state;

    let transition = reduce(state, Action::SubmitReplace);

    match transition.effect {
        Some(Effect::Send { command, .. }) => assert_eq!(
            command,
            Command::Replace {
                old_word: "colour".to_string(),
                new_word: "color".to_string(),
            }
        ),
        other => panic!("expected replace request, got {:?}", other),
    }
    assert_eq!(transition.state.busy_with(), Some(CommandKind::Replace));
}

#[test]
fn test_replace_success() {
    let state = reduce(searched("colour", &["colour", "colours"]), Action::OpenReplace).state;
    let state = reduce(state, Action::NewWordChanged("color".to_string())).state;
    let transition = reduce(state, Action::SubmitReplace);
    let id = sent_id(&transition);

    let state = reduce(transition.state, Action::ReplaceCompleted { id, result: Ok(()) }).state;

    assert_eq!(
        state.mode,
        Mode::ReplaceDone {
            old_word: "colour".to_string(),
            new_word: "color".to_string(),
        }
    );
    assert!(state.results.is_empty());
    assert!(state.error.is_none());
    assert_eq!(state.result_count, 2);
}

#[test]
fn test_replace_failure_stays_in_form() {
    let state = reduce(searched("colour", &["colour"]), Action::OpenReplace).state;
    let transition = reduce(state, Action::SubmitReplace);
    let id = sent_id(&transition);

    let state = reduce(
        transition.state,
        Action::ReplaceCompleted {
            id,
            result: Err(network_error()),
        },
    )
    .state;

    assert_eq!(state.mode, Mode::ReplaceForm);
    assert_eq!(state.error.as_deref(), Some(REPLACE_ERROR));
    assert_eq!(state.results, sentences(&["colour"]));
}

#[test]
fn test_double_submit_replace_is_ignored() {
    let state = reduce(searched("colour", &["colour"]), Action::OpenReplace).state;
    let first = reduce(state, Action::SubmitReplace);
    let second = reduce(first.state.clone(), Action::SubmitReplace);
    assert_eq!(second.effect, None);
    assert_eq!(second.state, first.state);
}

#[test]
fn test_request_delete_is_local() {
    let transition = reduce(searched("typo", &["typo"]), Action::RequestDelete);
    assert_eq!(transition.state.mode, Mode::DeleteConfirm);
    assert_eq!(transition.effect, None);
}

#[test]
fn test_delete_requested_then_confirmed() {
    let state = reduce(searched("typo", &["typo", "typos"]), Action::RequestDelete).state;
    let transition = reduce(state, Action::ConfirmDelete);
    assert!(matches!(
        &transition.effect,
        Some(Effect::Send {
            command: Command::Delete { word },
            ..
        }) if word == "typo"
    ));
    let id = sent_id(&transition);

    let state = reduce(transition.state, Action::DeleteCompleted { id, result: Ok(()) }).state;

    assert_eq!(
        state.mode,
        Mode::DeleteDone {
            word: "typo".to_string()
        }
    );
    assert!(state.results.is_empty());
    assert!(state.error.is_none());
}

#[test]
fn test_delete_failure_stays_in_confirmation() {
    let state = reduce(searched("typo", &["typo"]), Action::RequestDelete).state;
    let transition = reduce(state, Action::ConfirmDelete);
    let id = sent_id(&transition);

    let state = reduce(
        transition.state,
        Action::DeleteCompleted {
            id,
            result: Err(network_error()),
        },
    )
    .state;

    assert_eq!(state.mode, Mode::DeleteConfirm);
    assert_eq!(state.error.as_deref(), Some(DELETE_ERROR));
}

/// Submit a search for `query` and fail it
fn failed_search(query: &str) -> PanelState {
    let transition = reduce(with_query(query), Action::SubmitSearch);
    let id = sent_id(&transition);
    reduce(
        transition.state,
        Action::SearchCompleted {
            id,
            result: Err(network_error()),
        },
    )
    .state
}

#[test]
fn test_open_replace_drops_search_error() {
    let failed = failed_search("cat");
    assert_eq!(failed.error.as_deref(), Some(SEARCH_ERROR));

    let state = reduce(failed, Action::OpenReplace).state;

    assert_eq!(state.mode, Mode::ReplaceForm);
    assert!(state.error.is_none());
}

#[test]
fn test_request_delete_drops_search_error() {
    let state = reduce(failed_search("cat"), Action::RequestDelete).state;

    assert_eq!(state.mode, Mode::DeleteConfirm);
    assert!(state.error.is_none());
}

#[test]
fn test_cancel_form_drops_replace_error() {
    let state = reduce(searched("colour", &["colour"]), Action::OpenReplace).state;
    let transition = reduce(state, Action::SubmitReplace);
    let id = sent_id(&transition);
    let state = reduce(
        transition.state,
        Action::ReplaceCompleted {
            id,
            result: Err(network_error()),
        },
    )
    .state;
    assert_eq!(state.error.as_deref(), Some(REPLACE_ERROR));

    let state = reduce(state, Action::CancelForm).state;

    assert_eq!(state.mode, Mode::ShowingResults);
    assert!(state.error.is_none());
    assert_eq!(state.results, sentences(&["colour"]));
}

#[test]
fn test_cancel_form_drops_delete_error() {
    let state = reduce(searched("typo", &["typo"]), Action::RequestDelete).state;
    let transition = reduce(state, Action::ConfirmDelete);
    let id = sent_id(&transition);
    let state = reduce(
        transition.state,
        Action::DeleteCompleted {
            id,
            result: Err(network_error()),
        },
    )
    .state;

    let state = reduce(state, Action::CancelForm).state;

    assert_eq!(state.mode, Mode::ShowingResults);
    assert!(state.error.is_none());
}

#[test]
fn test_confirm_delete_needs_confirmation_view() {
    let transition = reduce(searched("typo", &["typo"]), Action::ConfirmDelete);
    assert_eq!(transition.effect, None);
    assert_eq!(transition.state.mode, Mode::ShowingResults);
}

#[test]
fn test_cancel_form_returns_to_results() {
    let state = reduce(searched("cat", &["cat"]), Action::OpenReplace).state;
    let state = reduce(state, Action::CancelForm).state;
    assert_eq!(state.mode, Mode::ShowingResults);

    let state = reduce(state, Action::RequestDelete).state;
    let state = reduce(state, Action::CancelForm).state;
    assert_eq!(state.mode, Mode::ShowingResults);
}

#[test]
fn test_cancel_form_waits_for_running_mutation() {
    let state = reduce(searched("cat", &["cat"]), Action::RequestDelete).state;
    let state = reduce(state, Action::ConfirmDelete).state;
    let state = reduce(state, Action::CancelForm).state;
    assert_eq!(state.mode, Mode::DeleteConfirm);
}

#[test]
fn test_reset_returns_to_idle_and_keeps_id_counter() {
    let state = searched("cat", &["cat"]);
    let last_id = state.last_request_id;

    let transition = reduce(state, Action::Reset);

    assert_eq!(transition.effect, None);
    assert_eq!(transition.state.mode, Mode::Idle);
    assert!(transition.state.query.is_empty());
    assert!(transition.state.results.is_empty());
    assert_eq!(transition.state.last_request_id, last_id);
}

#[test]
fn test_reset_cancels_running_request() {
    let running = reduce(with_query("cat"), Action::SubmitSearch).state;
    let transition = reduce(running, Action::Reset);
    assert_eq!(transition.effect, Some(Effect::CancelInFlight));
    assert!(!transition.state.is_busy());
}

#[test]
fn test_late_response_after_reset_is_ignored() {
    let running = reduce(with_query("cat"), Action::SubmitSearch);
    let id = sent_id(&running);
    let reset = reduce(running.state, Action::Reset).state;

    let state = reduce(
        reset.clone(),
        Action::SearchCompleted {
            id,
            result: Ok(sentences(&["cat"])),
        },
    )
    .state;

    assert_eq!(state, reset);
}

#[test]
fn test_request_ids_wrap() {
    let state = PanelState {
        query: "cat".to_string(),
        last_request_id: u64::MAX,
        ..PanelState::default()
    };
    let transition = reduce(state, Action::SubmitSearch);
    assert_eq!(sent_id(&transition), 0);
}

fn arb_user_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        "[a-z ]{0,6}".prop_map(Action::QueryChanged),
        "[a-z]{0,6}".prop_map(Action::NewWordChanged),
        Just(Action::SubmitSearch),
        Just(Action::OpenReplace),
        Just(Action::SubmitReplace),
        Just(Action::RequestDelete),
        Just(Action::ConfirmDelete),
        Just(Action::CancelForm),
        Just(Action::Reset),
    ]
}

fn arb_completion() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u64..6, prop::collection::vec("[a-z]{1,5}", 0..4))
            .prop_map(|(id, s)| Action::SearchCompleted { id, result: Ok(s) }),
        (0u64..6).prop_map(|id| Action::SearchCompleted {
            id,
            result: Err(ApiError::Cancelled)
        }),
        (0u64..6, prop::bool::ANY).prop_map(|(id, ok)| Action::ReplaceCompleted {
            id,
            result: if ok { Ok(()) } else { Err(ApiError::Cancelled) },
        }),
        (0u64..6, prop::bool::ANY).prop_map(|(id, ok)| Action::DeleteCompleted {
            id,
            result: if ok { Ok(()) } else { Err(ApiError::Cancelled) },
        }),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![3 => arb_user_action(), 1 => arb_completion()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Whatever happens, the panel keeps its bookkeeping consistent
    #[test]
    fn prop_state_stays_consistent(actions in prop::collection::vec(arb_action(), 0..40)) {
        let mut state = PanelState::new();

        for action in actions {
            let before_id = state.last_request_id;
            let transition = reduce(state, action);
            state = transition.state;

            if let Some(Effect::Send { id, command }) = &transition.effect {
                prop_assert_eq!(*id, before_id.wrapping_add(1));
                prop_assert!(state.is_current(*id));
                prop_assert_eq!(state.busy_with(), Some(command.kind()));
            }

            // Results only ever appear in the results view
            if !state.results.is_empty() {
                prop_assert!(matches!(
                    state.mode,
                    Mode::ShowingResults | Mode::ReplaceForm | Mode::DeleteConfirm
                ));
            }
            // Mutations only run from their own forms
            match state.busy_with() {
                Some(CommandKind::Replace) => prop_assert_eq!(&state.mode, &Mode::ReplaceForm),
                Some(CommandKind::Delete) => prop_assert_eq!(&state.mode, &Mode::DeleteConfirm),
                _ => {}
            }
            if state.mode == Mode::Idle {
                prop_assert!(!state.has_searched);
            }
        }
    }
}
