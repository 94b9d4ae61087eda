//! End-to-end resolution scenarios across routine, overrides and context.

use scheduler::chrono::{NaiveDate, NaiveDateTime};
use scheduler::{
    Category, DateSource, DraftTask, Priority, Recurrence, RecurrenceType, Resolver, Routine,
    RoutineWindow, SchedulingContext, SchedulingOverride,
};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn routine() -> Routine {
    Routine::new(vec![
        RoutineWindow::parse(Category::Work, "09:00", "18:00").unwrap(),
        RoutineWindow::parse(Category::Home, "18:00", "22:00").unwrap(),
    ])
    .unwrap()
}

fn draft(category: Category, due: Option<&str>) -> DraftTask {
    DraftTask {
        title: "Task".to_string(),
        category,
        estimated_time: 20,
        priority: Priority::Medium,
        inferred_due_date: due.map(str::to_string),
        inferred_recurrence: None,
    }
}

fn resolve_with(
    routine: &Routine,
    overrides: SchedulingOverride,
    now: NaiveDateTime,
    task: &DraftTask,
) -> scheduler::Resolution {
    let ctx = SchedulingContext::new(now);
    Resolver::new(routine, &overrides, &ctx).resolve(task)
}

// ============================================================================
// Window clamping
// ============================================================================

mod window_tests {
    use super::*;

    #[test]
    fn test_inside_window_unchanged() {
        let resolution = resolve_with(
            &routine(),
            SchedulingOverride::none(),
            at(18, 8, 0),
            &draft(Category::Work, Some("2026-10-18T14:00:00")),
        );
        assert_eq!(resolution.due_date, Some(at(18, 14, 0)));
        assert_eq!(resolution.source, DateSource::Inferred);
    }

    #[test]
    fn test_outside_window_moves_to_start_same_day() {
        let resolution = resolve_with(
            &routine(),
            SchedulingOverride::none(),
            at(18, 8, 0),
            &draft(Category::Work, Some("2026-10-18T20:00:00")),
        );
        assert_eq!(resolution.due_date, Some(at(18, 9, 0)));
        assert_eq!(resolution.source, DateSource::ClampedToWindow);
    }

    #[test]
    fn test_window_end_is_outside() {
        let resolution = resolve_with(
            &routine(),
            SchedulingOverride::none(),
            at(18, 8, 0),
            &draft(Category::Work, Some("2026-10-18T18:00:00")),
        );
        assert_eq!(resolution.due_date, Some(at(18, 9, 0)));
    }

    #[test]
    fn test_passed_window_rolls_to_tomorrow() {
        let resolution = resolve_with(
            &routine(),
            SchedulingOverride::none(),
            at(18, 19, 0),
            &draft(Category::Work, Some("2026-10-18T20:00:00")),
        );
        assert_eq!(resolution.due_date, Some(at(19, 9, 0)));
        assert_eq!(resolution.source, DateSource::RolledForward);
    }

    #[test]
    fn test_no_window_passthrough() {
        let resolution = resolve_with(
            &routine(),
            SchedulingOverride::none(),
            at(18, 19, 0),
            &draft(Category::Personal, Some("2026-10-18T03:15:00")),
        );
        assert_eq!(resolution.due_date, Some(at(18, 3, 15)));
        assert_eq!(resolution.source, DateSource::Inferred);
    }

    #[test]
    fn test_empty_routine_is_free_schedule() {
        let resolution = resolve_with(
            &Routine::empty(),
            SchedulingOverride::none(),
            at(18, 19, 0),
            &draft(Category::Work, Some("2026-10-18T23:00:00")),
        );
        assert_eq!(resolution.due_date, Some(at(18, 23, 0)));
    }
}

// ============================================================================
// Override precedence
// ============================================================================

mod precedence_tests {
    use super::*;

    #[test]
    fn test_manual_date_wins_over_inferred() {
        let overrides = SchedulingOverride::none()
            .with_manual_date("2026-10-25T10:30:00")
            .unwrap();

        for category in Category::ALL {
            let resolution = resolve_with(
                &routine(),
                overrides,
                at(18, 8, 0),
                &draft(category, Some("2026-10-19T20:00:00")),
            );
            assert_eq!(resolution.due_date, Some(at(25, 10, 30)));
            assert_eq!(resolution.source, DateSource::Manual);
        }
    }

    #[test]
    fn test_manual_date_applies_to_undated_drafts() {
        let overrides = SchedulingOverride::none()
            .with_manual_date("2026-10-25")
            .unwrap();
        let resolution = resolve_with(&routine(), overrides, at(18, 8, 0), &draft(Category::Home, None));
        assert_eq!(resolution.due_date, Some(at(25, 0, 0)));
    }

    #[test]
    fn test_manual_recurrence_wins() {
        let mut task = draft(Category::Health, None);
        task.inferred_recurrence = Some(Recurrence::every(RecurrenceType::Daily));

        let overrides = SchedulingOverride::none()
            .with_manual_recurrence(Recurrence::new(RecurrenceType::Weekly, 2).unwrap());
        let resolution = resolve_with(&routine(), overrides, at(18, 8, 0), &task);

        assert_eq!(resolution.recurrence_type, Some(RecurrenceType::Weekly));
        assert_eq!(resolution.recurrence_interval, 2);
    }

    #[test]
    fn test_inferred_recurrence_kept_without_override() {
        let mut task = draft(Category::Health, None);
        task.inferred_recurrence = Some(Recurrence::new(RecurrenceType::Monthly, 3).unwrap());

        let resolution = resolve_with(&routine(), SchedulingOverride::none(), at(18, 8, 0), &task);
        assert_eq!(resolution.recurrence_type, Some(RecurrenceType::Monthly));
        assert_eq!(resolution.recurrence_interval, 3);
    }

    #[test]
    fn test_no_recurrence_defaults_interval_to_one() {
        let resolution = resolve_with(
            &routine(),
            SchedulingOverride::none(),
            at(18, 8, 0),
            &draft(Category::Study, None),
        );
        assert_eq!(resolution.recurrence_type, None);
        assert_eq!(resolution.recurrence_interval, 1);
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_resolution_is_deterministic() {
    let routine = routine();
    let overrides = SchedulingOverride::none();
    let ctx = SchedulingContext::new(at(18, 19, 0));
    let resolver = Resolver::new(&routine, &overrides, &ctx);

    let cases = [
        draft(Category::Work, Some("2026-10-18T20:00:00")),
        draft(Category::Home, Some("2026-10-20T09:00")),
        draft(Category::Personal, None),
        draft(Category::Study, Some("garbage")),
    ];

    for case in &cases {
        assert_eq!(resolver.resolve(case), resolver.resolve(case));
        assert_eq!(
            resolver.resolve_task("u", case.clone()),
            resolver.resolve_task("u", case.clone())
        );
    }
}
