//! Property-based tests for task ordering and filtering.
//!
//! Uses proptest to verify:
//! 1. Every pinned task precedes every unpinned task, for any sort spec.
//! 2. `order` is a permutation of its input.
//! 3. Within a pinned group, ascending and descending orders are reverses
//!    of each other once ties are collapsed.
//! 4. Filtering with no criteria is the identity; tag filtering is exact.

use proptest::prelude::*;
use taskboard_core::{SortDirection, SortKey, SortSpec, Task, TaskFilter, order};

/// Strategy for due dates: mostly valid dates, sometimes garbage or absent.
fn arb_due_date() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => (2020i32..2030, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| Some(format!("{y:04}-{m:02}-{d:02}"))),
        1 => Just(Some("not a date".to_string())),
        1 => Just(None),
    ]
}

/// Strategy for a small tag vocabulary so tag filters actually hit.
fn arb_tags() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just("work".to_string()),
            Just("home".to_string()),
            Just("urgent".to_string()),
            Just("urgent-ish".to_string()),
        ],
        0..4,
    )
}

/// Strategy for arbitrary tasks. Titles are unique per index so that
/// the permutation check can compare by title.
fn arb_task() -> impl Strategy<Value = Task> {
    (-5i64..5, arb_due_date(), any::<bool>(), arb_tags()).prop_map(
        |(priority, due_date, pinned, tags)| {
            let mut task = Task::new("")
                .with_priority(priority)
                .with_pinned(pinned)
                .with_tags(tags);
            task.due_date = due_date;
            task
        },
    )
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task(), 0..40).prop_map(|mut tasks| {
        for (i, task) in tasks.iter_mut().enumerate() {
            task.title = format!("task-{i}");
        }
        tasks
    })
}

fn arb_spec() -> impl Strategy<Value = Option<SortSpec>> {
    let key = prop_oneof![Just(SortKey::DueDate), Just(SortKey::Priority)];
    let direction = prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)];
    prop::option::of((key, direction).prop_map(|(k, d)| SortSpec::new(k, d)))
}

/// Sort key value used to collapse ties when comparing asc/desc.
fn key_value(task: &Task, key: SortKey) -> (bool, Option<i64>) {
    match key {
        SortKey::DueDate => (task.due_timestamp().is_none(), task.due_timestamp()),
        SortKey::Priority => (false, Some(task.priority)),
    }
}

proptest! {
    #[test]
    fn pinned_always_first(tasks in arb_tasks(), spec in arb_spec()) {
        let sorted = order(&tasks, spec);
        let first_unpinned = sorted.iter().position(|t| !t.pinned).unwrap_or(sorted.len());
        prop_assert!(sorted[first_unpinned..].iter().all(|t| !t.pinned));
    }

    #[test]
    fn order_is_a_permutation(tasks in arb_tasks(), spec in arb_spec()) {
        let sorted = order(&tasks, spec);
        prop_assert_eq!(sorted.len(), tasks.len());
        let mut a: Vec<_> = tasks.iter().map(|t| t.title.clone()).collect();
        let mut b: Vec<_> = sorted.iter().map(|t| t.title.clone()).collect();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn no_spec_keeps_relative_order_within_groups(tasks in arb_tasks()) {
        let sorted = order(&tasks, None);
        for pinned in [true, false] {
            let expected: Vec<_> = tasks.iter().filter(|t| t.pinned == pinned).collect();
            let actual: Vec<_> = sorted.iter().filter(|t| t.pinned == pinned).collect();
            prop_assert_eq!(expected, actual);
        }
    }

    #[test]
    fn asc_and_desc_are_reverses_up_to_ties(
        tasks in arb_tasks(),
        key in prop_oneof![Just(SortKey::DueDate), Just(SortKey::Priority)],
    ) {
        let asc = order(&tasks, Some(SortSpec::new(key, SortDirection::Asc)));
        let desc = order(&tasks, Some(SortSpec::new(key, SortDirection::Desc)));
        for pinned in [true, false] {
            let asc_keys: Vec<_> = asc
                .iter()
                .filter(|t| t.pinned == pinned)
                .map(|t| key_value(t, key))
                .collect();
            let mut desc_keys: Vec<_> = desc
                .iter()
                .filter(|t| t.pinned == pinned)
                .map(|t| key_value(t, key))
                .collect();
            desc_keys.reverse();
            prop_assert_eq!(asc_keys, desc_keys);
        }
    }

    #[test]
    fn empty_filter_is_identity(tasks in arb_tasks()) {
        prop_assert_eq!(TaskFilter::default().apply(&tasks), tasks);
    }

    #[test]
    fn tag_filter_matches_whole_tokens_only(tasks in arb_tasks()) {
        let filter = TaskFilter::new(None, Some("urgent".to_string()));
        let kept = filter.apply(&tasks);
        prop_assert!(kept.iter().all(|t| t.tags.iter().any(|tag| tag == "urgent")));
        let expected = tasks.iter().filter(|t| t.tags.contains(&"urgent".to_string())).count();
        prop_assert_eq!(kept.len(), expected);
    }
}
