use rworklog::core::{ManualClock, PromptKind, PromptResponse, Session, SessionEvent};
use rworklog::errors::AppError;
use rworklog::models::{Label, Mode, Period, Record};
use std::time::{Duration, Instant};

mod common;
use common::{MemoryStorage, answer, at, day, run_ticks, started, t};

#[test]
fn test_expiry_then_confirm_records_activity_and_starts_rest() {
    let (mut session, storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 60);
    assert_eq!(session.remaining_seconds(), 0);
    assert!(!session.is_ticking());
    assert_eq!(
        session.pending_prompt().map(|p| p.kind),
        Some(PromptKind::Activity)
    );
    assert!(
        session
            .drain_events()
            .contains(&SessionEvent::PromptRequested(PromptKind::Activity))
    );

    answer(&mut session, "wrote design doc");

    assert_eq!(session.records().len(), 1);
    let record = &session.records()[0];
    assert_eq!(record.label, Label::Activity("wrote design doc".to_string()));
    assert_eq!(record.period.to_string(), "09:00:00 - 09:01:00");
    assert_eq!(session.mode(), Mode::Resting);
    assert_eq!(session.remaining_seconds(), 60);
    assert!(session.is_ticking());
    assert_eq!(storage.stored(&day()), session.records().to_vec());
}

#[test]
fn test_work_interval_flips_to_rest_exactly_once() {
    for (work, rest) in [(1, 1), (2, 1), (5, 3), (120, 60)] {
        let (mut session, _storage, clock) = started(work, rest);

        run_ticks(&mut session, &clock, work * 60);
        answer(&mut session, "done");

        let flips = session
            .drain_events()
            .iter()
            .filter(|e| **e == SessionEvent::ModeChanged(Mode::Resting))
            .count();
        assert_eq!(flips, 1, "work={work} rest={rest}");
        assert_eq!(session.mode(), Mode::Resting);
        assert_eq!(session.remaining_seconds(), rest * 60);
        assert_eq!(session.records().len(), 1);
    }
}

#[test]
fn test_ticks_are_ignored_while_prompt_is_open() {
    let (mut session, _storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 60);
    session.drain_events();
    run_ticks(&mut session, &clock, 30);

    assert_eq!(session.remaining_seconds(), 0);
    assert!(session.drain_events().is_empty());

    // the idle wait is part of the closed period
    answer(&mut session, "reading");
    assert_eq!(
        session.records()[0].period.to_string(),
        "09:00:00 - 09:01:30"
    );
}

#[test]
fn test_full_cycle_chains_periods() {
    let (mut session, _storage, clock) = started(1, 2);

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "coding");
    run_ticks(&mut session, &clock, 120);
    answer(&mut session, "coffee ☕");

    assert_eq!(session.mode(), Mode::Working);
    assert_eq!(session.remaining_seconds(), 60);

    let records = session.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].period.end(), records[1].period.start());
    assert_eq!(records[1].period.to_string(), "09:01:00 - 09:03:00");
    assert_eq!(records[1].label.text(), "coffee ☕");
}

#[test]
fn test_cancelled_prompt_advances_without_recording() {
    let (mut session, storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 60);
    session.respond(PromptResponse::Cancelled).unwrap();

    assert!(session.records().is_empty());
    assert_eq!(storage.save_count(), 0);
    assert_eq!(session.mode(), Mode::Resting);
    assert_eq!(session.last_boundary(), Some(at(9, 1, 0)));

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "stretching");
    assert_eq!(
        session.records()[0].period.to_string(),
        "09:01:00 - 09:02:00"
    );
}

#[test]
fn test_blank_text_counts_as_cancel() {
    let (mut session, _storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "   ");

    assert!(session.records().is_empty());
    assert_eq!(session.mode(), Mode::Resting);
}

#[test]
fn test_pause_and_resume_records_pause_duration() {
    let (mut session, storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 30);
    assert_eq!(session.remaining_seconds(), 30);

    session.pause().unwrap();
    assert!(!session.is_ticking());
    answer(&mut session, "first half");

    assert_eq!(session.mode(), Mode::Paused);
    assert_eq!(session.paused_at(), Some(at(9, 0, 30)));

    // ticks do nothing while paused
    run_ticks(&mut session, &clock, 5);
    assert_eq!(session.remaining_seconds(), 30);

    clock.set(at(9, 2, 30));
    session.resume("phone call").unwrap();

    assert_eq!(session.mode(), Mode::Working);
    assert_eq!(session.remaining_seconds(), 60);
    assert!(session.is_ticking());
    assert_eq!(session.paused_at(), None);

    let records = session.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].period.to_string(), "09:00:00 - 09:00:30");
    assert_eq!(records[1].period.to_string(), "09:00:30 - 09:02:30");
    match &records[1].label {
        Label::Pause { reason, minutes } => {
            assert_eq!(reason, "phone call");
            assert!((minutes - 2.0).abs() < 1e-9);
        }
        other => panic!("expected a pause, got {other:?}"),
    }
    assert_eq!(storage.stored(&day()).len(), 2);
}

#[test]
fn test_resume_advances_boundary_past_pause() {
    let (mut session, _storage, clock) = started(1, 1);

    session.pause().unwrap();
    session.respond(PromptResponse::Cancelled).unwrap();
    clock.advance_secs(300);
    session.resume("lunch").unwrap();

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "after lunch");

    let last = session.records().last().unwrap();
    assert_eq!(last.period.to_string(), "09:05:00 - 09:06:00");
}

#[test]
fn test_pause_during_rest_resumes_rest() {
    let (mut session, _storage, clock) = started(1, 3);

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "work");
    run_ticks(&mut session, &clock, 10);

    session.pause().unwrap();
    answer(&mut session, "rest");
    clock.advance_secs(30);
    session.resume("").unwrap();

    assert_eq!(session.mode(), Mode::Resting);
    assert_eq!(session.remaining_seconds(), 180);
}

#[test]
fn test_empty_reason_still_records_pause() {
    let (mut session, _storage, clock) = started(1, 1);

    session.pause().unwrap();
    answer(&mut session, "x");
    clock.advance_secs(90);
    session.request_resume().unwrap();
    assert_eq!(
        session.pending_prompt().map(|p| p.kind),
        Some(PromptKind::PauseReason)
    );
    session.respond(PromptResponse::Cancelled).unwrap();

    let pause = session.records().last().unwrap();
    assert_eq!(
        pause.label,
        Label::Pause {
            reason: String::new(),
            minutes: 1.5
        }
    );
    assert_eq!(session.mode(), Mode::Working);
}

#[test]
fn test_invalid_transitions_are_rejected() {
    let (mut session, _storage, _clock) = started(1, 1);

    assert!(matches!(
        session.resume("nope"),
        Err(AppError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.request_resume(),
        Err(AppError::InvalidTransition { .. })
    ));

    session.pause().unwrap();
    assert!(matches!(session.pause(), Err(AppError::PromptPending(_))));
    assert!(matches!(session.end(), Err(AppError::PromptPending(_))));
    answer(&mut session, "x");

    assert!(matches!(
        session.pause(),
        Err(AppError::InvalidTransition {
            mode: Mode::Paused,
            ..
        })
    ));
    assert!(matches!(
        session.switch_task(),
        Err(AppError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.respond(PromptResponse::Cancelled),
        Err(AppError::NoPendingPrompt)
    ));
}

#[test]
fn test_switch_task_restarts_same_mode() {
    let (mut session, _storage, clock) = started(2, 1);

    run_ticks(&mut session, &clock, 45);
    session.switch_task().unwrap();
    answer(&mut session, "task A");

    assert_eq!(session.mode(), Mode::Working);
    assert_eq!(session.remaining_seconds(), 120);
    assert_eq!(
        session.records()[0].period.to_string(),
        "09:00:00 - 09:00:45"
    );
    assert!(
        !session
            .drain_events()
            .iter()
            .any(|e| matches!(e, SessionEvent::ModeChanged(_)))
    );
}

#[test]
fn test_end_flushes_and_terminates() {
    let (mut session, storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 20);
    session.end().unwrap();
    answer(&mut session, "final bit");

    assert!(session.is_ended());
    assert!(!session.is_ticking());
    assert!(session.drain_events().contains(&SessionEvent::Terminated));
    assert_eq!(storage.stored(&day()).len(), 1);

    assert!(matches!(session.pause(), Err(AppError::SessionEnded)));
    assert!(matches!(session.end(), Err(AppError::SessionEnded)));
    assert!(matches!(
        session.delete_record(0),
        Err(AppError::SessionEnded)
    ));
    run_ticks(&mut session, &clock, 5);
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_end_while_paused_closes_pause() {
    let (mut session, _storage, clock) = started(1, 1);

    session.pause().unwrap();
    answer(&mut session, "work");
    clock.advance_secs(60);
    session.end().unwrap();
    assert_eq!(
        session.pending_prompt().map(|p| p.kind),
        Some(PromptKind::PauseReason)
    );
    answer(&mut session, "done for today");

    assert!(session.is_ended());
    let last = session.records().last().unwrap();
    assert!(last.label.is_pause());
    assert_eq!(last.label.text(), "done for today");
}

#[test]
fn test_end_before_start_needs_no_prompt() {
    let storage = MemoryStorage::default();
    let mut session = Session::open(day(), storage, ManualClock::new(at(8, 0, 0)));

    session.end().unwrap();
    assert!(session.is_ended());
    assert!(session.pending_prompt().is_none());
}

#[test]
fn test_configuration_rules() {
    let clock = ManualClock::new(at(9, 0, 0));
    let mut session = Session::open(day(), MemoryStorage::default(), clock);

    assert!(matches!(session.start(), Err(AppError::NotConfigured)));
    for (work, rest) in [(0, 5), (121, 5), (45, 0), (45, 61)] {
        assert!(
            matches!(
                session.configure(work, rest),
                Err(AppError::InvalidConfig(_))
            ),
            "work={work} rest={rest}"
        );
    }
    assert!(session.intervals().is_none());

    session.configure(120, 60).unwrap();
    assert!(matches!(
        session.configure(45, 10),
        Err(AppError::AlreadyConfigured)
    ));

    session.start().unwrap();
    assert_eq!(session.remaining_seconds(), 120 * 60);
    assert_eq!(session.mode(), Mode::Working);
    assert!(matches!(
        session.start(),
        Err(AppError::InvalidTransition { .. })
    ));
}

#[test]
fn test_duplicate_record_is_not_appended_again() {
    let existing = Record::activity(
        Period::new(t(9, 0, 0), t(9, 1, 0)).unwrap(),
        "wrote design doc",
    );
    let storage = MemoryStorage::with_records(day(), vec![existing]);
    let clock = ManualClock::new(at(9, 0, 0));
    let mut session = Session::open(day(), storage.clone(), clock.clone());
    session.configure(1, 1).unwrap();
    session.start().unwrap();
    session.drain_events();

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "wrote design doc");

    assert_eq!(session.records().len(), 1);
    assert_eq!(storage.save_count(), 0);
    assert!(
        !session
            .drain_events()
            .iter()
            .any(|e| matches!(e, SessionEvent::RecordAdded { .. }))
    );
    // the state machine still moved on
    assert_eq!(session.mode(), Mode::Resting);
}

#[test]
fn test_previous_records_are_picked_up_on_open() {
    let earlier = vec![
        Record::activity(Period::new(t(7, 0, 0), t(7, 45, 0)).unwrap(), "mail"),
        Record::pause(Period::new(t(7, 45, 0), t(8, 0, 0)).unwrap(), "bus", 15.0),
    ];
    let storage = MemoryStorage::with_records(day(), earlier.clone());
    let clock = ManualClock::new(at(9, 0, 0));
    let mut session = Session::open(day(), storage.clone(), clock.clone());

    assert_eq!(session.records(), earlier.as_slice());

    session.configure(1, 1).unwrap();
    session.start().unwrap();
    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "standup");

    let stored = storage.stored(&day());
    assert_eq!(stored.len(), 3);
    assert_eq!(&stored[..2], earlier.as_slice());
}

#[test]
fn test_corrupt_storage_starts_empty_with_warning() {
    let storage = MemoryStorage::default();
    storage.set_corrupt(true);
    let mut session = Session::open(day(), storage, ManualClock::new(at(9, 0, 0)));

    assert!(session.records().is_empty());
    let events = session.drain_events();
    assert!(matches!(events.as_slice(), [SessionEvent::Warning(_)]));
}

#[test]
fn test_failed_save_warns_and_keeps_memory_then_retries() {
    let (mut session, storage, clock) = started(1, 1);
    storage.set_fail_saves(true);

    run_ticks(&mut session, &clock, 60);
    session.drain_events();
    answer(&mut session, "unsaved work");

    assert_eq!(session.records().len(), 1);
    assert!(storage.stored(&day()).is_empty());
    assert!(
        session
            .drain_events()
            .iter()
            .any(|e| matches!(e, SessionEvent::Warning(_)))
    );

    storage.set_fail_saves(false);
    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "break");

    assert_eq!(storage.stored(&day()), session.records().to_vec());
    assert_eq!(storage.stored(&day()).len(), 2);
}

#[test]
fn test_end_retries_a_failed_save() {
    let (mut session, storage, clock) = started(1, 1);
    storage.set_fail_saves(true);

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "unsaved work");
    assert!(storage.stored(&day()).is_empty());

    storage.set_fail_saves(false);
    clock.advance_secs(30);
    session.end().unwrap();
    session.respond(PromptResponse::Cancelled).unwrap();

    assert!(session.is_ended());
    assert_eq!(storage.stored(&day()), session.records().to_vec());
    assert_eq!(storage.stored(&day()).len(), 1);
}

#[test]
fn test_end_without_pending_changes_does_not_save_again() {
    let (mut session, storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "saved work");
    assert_eq!(storage.save_count(), 1);

    session.end().unwrap();
    session.respond(PromptResponse::Cancelled).unwrap();

    assert!(session.is_ended());
    assert_eq!(storage.save_count(), 1);
}

#[test]
fn test_resume_does_not_answer_the_end_prompt() {
    let (mut session, storage, clock) = started(1, 1);

    session.pause().unwrap();
    answer(&mut session, "morning work");
    clock.advance_secs(300);
    session.end().unwrap();

    assert!(matches!(
        session.resume("lunch"),
        Err(AppError::PromptPending(PromptKind::PauseReason))
    ));
    assert_eq!(session.mode(), Mode::Paused);
    assert!(!session.is_ticking());
    assert!(!session.is_ended());

    answer(&mut session, "lunch");

    assert!(session.is_ended());
    let last = session.records().last().unwrap();
    assert_eq!(
        last.label,
        Label::Pause {
            reason: "lunch".to_string(),
            minutes: 5.0
        }
    );
    assert_eq!(storage.stored(&day()).len(), 2);
}

#[test]
fn test_edit_record_keeps_kind_and_period() {
    let (mut session, storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "typo");
    session.pause().unwrap();
    answer(&mut session, "rest");
    clock.advance_secs(120);
    session.resume("tea").unwrap();
    session.drain_events();

    session.edit_record(0, "fixed description").unwrap();
    session.edit_record(2, "green tea").unwrap();

    let records = session.records();
    assert_eq!(records[0].label, Label::Activity("fixed description".into()));
    assert_eq!(records[0].period.to_string(), "09:00:00 - 09:01:00");
    assert_eq!(
        records[2].label,
        Label::Pause {
            reason: "green tea".into(),
            minutes: 2.0
        }
    );
    assert_eq!(storage.stored(&day()), records.to_vec());
    assert!(
        session
            .drain_events()
            .iter()
            .all(|e| matches!(e, SessionEvent::RecordChanged { .. }))
    );

    let before = session.records().to_vec();
    assert!(matches!(
        session.edit_record(3, "x"),
        Err(AppError::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(matches!(
        session.edit_record(0, "  "),
        Err(AppError::EmptyDescription)
    ));
    assert_eq!(session.records(), before.as_slice());
}

#[test]
fn test_delete_record() {
    let (mut session, storage, clock) = started(1, 1);

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "one");
    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "two");

    let before = session.records().to_vec();
    assert!(matches!(
        session.delete_record(7),
        Err(AppError::IndexOutOfRange { index: 7, len: 2 })
    ));
    assert_eq!(session.records(), before.as_slice());

    session.drain_events();
    session.delete_record(0).unwrap();
    assert_eq!(session.records().len(), 1);
    assert_eq!(session.records()[0].label.text(), "two");
    assert_eq!(storage.stored(&day()).len(), 1);
    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::RecordRemoved { index: 0 }]
    );
}

#[test]
fn test_period_crossing_midnight_is_clamped() {
    let storage = MemoryStorage::default();
    let clock = ManualClock::new(at(23, 59, 30));
    let mut session = Session::open(day(), storage, clock.clone());
    session.configure(1, 1).unwrap();
    session.start().unwrap();

    run_ticks(&mut session, &clock, 60);
    answer(&mut session, "late night");

    assert_eq!(
        session.records()[0].period.to_string(),
        "23:59:30 - 23:59:59"
    );
}

#[test]
fn test_poll_ticks_stops_at_expiry() {
    let (mut session, _storage, _clock) = started(1, 1);

    session.poll_ticks(Instant::now() + Duration::from_secs(600));

    assert_eq!(session.remaining_seconds(), 0);
    assert!(!session.is_ticking());
    assert!(session.pending_prompt().is_some());
    assert_eq!(session.time_until_next_tick(Instant::now()), None);
}

#[test]
fn test_poll_ticks_before_deadline_does_nothing() {
    let (mut session, _storage, _clock) = started(1, 1);

    session.poll_ticks(Instant::now());

    assert_eq!(session.remaining_seconds(), 60);
    assert!(session.time_until_next_tick(Instant::now()).is_some());
}
