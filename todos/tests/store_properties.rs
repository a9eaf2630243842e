//! Property tests for the derived views over generated states.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use tasklist::{FilterMode, SortMode, Todo, TodoId, TodoState};

fn base() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
}

fn arb_todo() -> impl Strategy<Value = Todo> {
    (0_i64..10_000, any::<bool>(), 0_i64..3_600, 0_i64..3_600).prop_map(
        |(id, completed, created_offset, touched_offset)| {
            let created = base() + Duration::seconds(created_offset);
            let mut todo = Todo::new_local(TodoId(id), format!("todo {id}"), created);
            todo.completed = completed;
            todo.updated_at = created + Duration::seconds(touched_offset);
            todo
        },
    )
}

fn arb_sort() -> impl Strategy<Value = SortMode> {
    prop_oneof![Just(SortMode::ByRecency), Just(SortMode::ById)]
}

fn arb_filter() -> impl Strategy<Value = FilterMode> {
    prop_oneof![
        Just(FilterMode::All),
        Just(FilterMode::Active),
        Just(FilterMode::Done),
    ]
}

fn arb_state() -> impl Strategy<Value = TodoState> {
    (prop::collection::vec(arb_todo(), 0..40), arb_sort(), arb_filter()).prop_map(
        |(items, sort_mode, filter_mode)| TodoState {
            items,
            sort_mode,
            filter_mode,
            ..TodoState::default()
        },
    )
}

proptest! {
    #[test]
    fn prop_filter_keeps_exactly_matching_records(state in arb_state()) {
        let visible = state.visible_items();

        for todo in &visible {
            match state.filter_mode {
                FilterMode::All => {}
                FilterMode::Active => prop_assert!(!todo.completed),
                FilterMode::Done => prop_assert!(todo.completed),
            }
        }

        let expected = state
            .items
            .iter()
            .filter(|todo| state.filter_mode.matches(todo))
            .count();
        prop_assert_eq!(visible.len(), expected);
    }

    #[test]
    fn prop_sort_orders_visible_records(state in arb_state()) {
        let visible = state.visible_items();

        for pair in visible.windows(2) {
            match state.sort_mode {
                SortMode::ById => prop_assert!(pair[0].id <= pair[1].id),
                SortMode::ByRecency => prop_assert!(pair[0].updated_at >= pair[1].updated_at),
            }
        }
    }

    #[test]
    fn prop_stats_are_consistent(state in arb_state()) {
        let stats = state.stats();

        prop_assert_eq!(stats.total, state.items.len());
        prop_assert_eq!(stats.active + stats.completed, stats.total);
        prop_assert_eq!(
            stats.completed,
            state.items.iter().filter(|todo| todo.completed).count()
        );
    }

    #[test]
    fn prop_selectors_do_not_mutate(state in arb_state()) {
        let before = state.clone();
        let _ = state.visible_items();
        let _ = state.stats();
        prop_assert_eq!(state, before);
    }
}
