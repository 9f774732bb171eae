//! Property-based tests for validation, uniqueness, and the milestone lifecycle.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use std::sync::Arc;

use release_tracker::adapters::InMemoryTrackerStore;
use release_tracker::application::{
    CreateMilestoneCommand, CreateMilestoneHandler, GetMilestoneHandler, GetMilestoneQuery,
};
use release_tracker::domain::foundation::{today, MilestoneId, ProjectId, Scope, StateMachine};
use release_tracker::domain::milestone::{Milestone, MilestoneState};
use release_tracker::domain::validation::{
    validate_milestone_input, MilestoneInput, ValidationPolicy, MAX_TITLE_LENGTH,
};
use release_tracker::domain::TrackerError;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn create_command(title: &str, scope: Scope) -> CreateMilestoneCommand {
    CreateMilestoneCommand {
        scope,
        input: MilestoneInput {
            title: Some(title.to_string()),
            ..Default::default()
        },
    }
}

fn state_strategy() -> impl Strategy<Value = MilestoneState> {
    prop::sample::select(MilestoneState::ALL.to_vec())
}

// ============================================================================
// Validation
// ============================================================================

proptest! {
    /// start_date > due_date always fails; start_date <= due_date never does.
    #[test]
    fn prop_start_after_due_always_fails(start in 0u64..2000, due in 0u64..2000) {
        let input = MilestoneInput {
            title: Some("Alpha".to_string()),
            start_date: base_date().checked_add_days(Days::new(start)),
            due_date: base_date().checked_add_days(Days::new(due)),
            ..Default::default()
        };

        let result = validate_milestone_input(&input, &ValidationPolicy::default());

        if start > due {
            let errors = result.unwrap_err();
            prop_assert!(errors.has_field("due_date"));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Title length is measured in characters, not bytes.
    #[test]
    fn prop_title_length_limit(title in "[a-zé]{1,300}") {
        let input = MilestoneInput {
            title: Some(title.clone()),
            ..Default::default()
        };

        let result = validate_milestone_input(&input, &ValidationPolicy::default());

        prop_assert_eq!(result.is_ok(), title.chars().count() <= MAX_TITLE_LENGTH);
    }
}

// ============================================================================
// State machine
// ============================================================================

proptest! {
    /// Any sequence of requested moves only ever advances one step at a time.
    #[test]
    fn prop_lifecycle_is_monotonic(targets in prop::collection::vec(state_strategy(), 0..12)) {
        let mut milestone = Milestone::create(
            MilestoneId::new(),
            Scope::Global,
            MilestoneInput {
                title: Some("Alpha".to_string()),
                ..Default::default()
            },
            &ValidationPolicy::default(),
        )
        .unwrap();

        for target in targets {
            let before = milestone.state();
            match milestone.transition_to(target) {
                Ok(()) => {
                    prop_assert!(before.can_transition_to(&target));
                    prop_assert_eq!(milestone.state(), target);
                }
                Err(err) => {
                    prop_assert_eq!(err.from, before);
                    prop_assert_eq!(milestone.state(), before);
                }
            }
        }
    }
}

// ============================================================================
// Store round trips
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Same (title, scope) twice fails; the same title in another scope succeeds.
    #[test]
    fn prop_titles_unique_per_scope(
        title in "[A-Za-z0-9][A-Za-z0-9 ]{0,39}",
        project in 1i64..1000,
        other in 1i64..1000,
    ) {
        prop_assume!(project != other);

        runtime().block_on(async {
            let store = Arc::new(InMemoryTrackerStore::new());
            let handler = CreateMilestoneHandler::new(store.clone(), ValidationPolicy::default());
            let scope = Scope::Project(ProjectId::new(project));

            handler.handle(create_command(&title, scope)).await.unwrap();

            let duplicate = handler.handle(create_command(&title, scope)).await;
            assert!(matches!(duplicate, Err(TrackerError::DuplicateTitle { .. })));

            let elsewhere = handler
                .handle(create_command(&title, Scope::Project(ProjectId::new(other))))
                .await;
            assert!(elsewhere.is_ok());
            assert_eq!(store.milestone_count().await, 2);
        });
    }

    /// Whatever is created can be fetched back unchanged.
    #[test]
    fn prop_create_then_get_round_trips(
        title in "[A-Za-z][A-Za-z0-9 .-]{0,60}",
        description in prop::option::of("[ -~]{0,200}"),
        due_in in prop::option::of(0u64..365),
    ) {
        runtime().block_on(async {
            let store = Arc::new(InMemoryTrackerStore::new());
            let input = MilestoneInput {
                title: Some(title.clone()),
                description,
                start_date: None,
                due_date: due_in.and_then(|d| today().checked_add_days(Days::new(d))),
            };

            let created = CreateMilestoneHandler::new(store.clone(), ValidationPolicy::default())
                .handle(CreateMilestoneCommand {
                    scope: Scope::Global,
                    input: input.clone(),
                })
                .await
                .unwrap();
            let fetched = GetMilestoneHandler::new(store)
                .handle(GetMilestoneQuery {
                    milestone_id: *created.id(),
                })
                .await
                .unwrap();

            assert_eq!(fetched.title(), title);
            assert_eq!(fetched.description(), input.description.as_deref());
            assert_eq!(fetched.due_date(), input.due_date);
            assert_eq!(fetched.state(), MilestoneState::Created);
            assert_eq!(fetched, created);
        });
    }
}
