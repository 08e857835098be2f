use chrono::{DateTime, Duration, Local, TimeZone};
use std::rc::Rc;
use taskflow_core::{
    AchievementId, FixedClock, KeyValueStore, MemoryKeyValueStore, NewTask, SequentialIdSource,
    SessionOptions, TaskSession, ACHIEVEMENTS_KEY,
};

fn at(hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 10, hour, 15, 0).single().unwrap()
}

fn session<'a>(
    storage: &'a MemoryKeyValueStore,
    clock: &Rc<FixedClock>,
) -> TaskSession<&'a MemoryKeyValueStore> {
    TaskSession::restore(
        storage,
        SessionOptions::default(),
        Box::new(Rc::clone(clock)),
        Box::new(SequentialIdSource::new()),
    )
}

#[test]
fn three_completed_morning_tasks_unlock_early_bird() {
    let storage = MemoryKeyValueStore::new();
    let clock = Rc::new(FixedClock::new(at(8)));
    let mut session = session(&storage, &clock);

    let mut ids = Vec::new();
    for hour in [8, 9, 9] {
        clock.set(at(hour));
        ids.push(session.add_task(NewTask::new(format!("created at {hour}"))).unwrap().id);
    }

    clock.set(at(15));
    assert!(session.toggle_complete(&ids[0]).unlocked.is_empty());
    assert!(session.toggle_complete(&ids[1]).unlocked.is_empty());
    let report = session.toggle_complete(&ids[2]);

    assert_eq!(report.unlocked, vec![AchievementId::EarlyBird]);
    assert!(session.unlocked().contains(AchievementId::EarlyBird));
}

#[test]
fn afternoon_tasks_do_not_count_toward_early_bird() {
    let storage = MemoryKeyValueStore::new();
    let clock = Rc::new(FixedClock::new(at(10)));
    let mut session = session(&storage, &clock);

    for _ in 0..3 {
        let id = session.add_task(NewTask::new("ten o'clock")).unwrap().id;
        session.toggle_complete(&id);
    }
    assert!(!session.unlocked().contains(AchievementId::EarlyBird));
}

#[test]
fn tracking_150_minutes_unlocks_deep_focus() {
    let storage = MemoryKeyValueStore::new();
    let clock = Rc::new(FixedClock::new(at(14)));
    let mut session = session(&storage, &clock);
    let id = session.add_task(NewTask::new("write chapter")).unwrap().id;
    assert_eq!(session.task(&id).unwrap().time_spent_minutes(), 0);

    let report = session.add_time_spent(&id, 150);

    assert_eq!(session.task(&id).unwrap().time_spent_minutes(), 150);
    assert_eq!(report.unlocked, vec![AchievementId::DeepFocus]);
}

#[test]
fn five_completions_created_before_due_unlock_on_time() {
    let storage = MemoryKeyValueStore::new();
    let clock = Rc::new(FixedClock::new(at(12)));
    let mut session = session(&storage, &clock);

    let mut ids = Vec::new();
    for index in 0..5 {
        let request = NewTask::new(format!("due {index}")).due(at(18));
        ids.push(session.add_task(request).unwrap().id);
    }
    // Already past due at creation: never counts.
    let late = session
        .add_task(NewTask::new("late").due(at(12) - Duration::hours(1)))
        .unwrap()
        .id;
    session.toggle_complete(&late);

    for id in &ids[..4] {
        session.toggle_complete(id);
    }
    assert!(!session.unlocked().contains(AchievementId::OnTime));

    // Completion after the due time still counts; only creation time is compared.
    clock.set(at(20));
    let report = session.toggle_complete(&ids[4]);
    assert_eq!(report.unlocked, vec![AchievementId::OnTime]);
}

#[test]
fn badge_collector_unlocks_on_the_pass_after_the_third_badge() {
    let storage = MemoryKeyValueStore::new();
    let clock = Rc::new(FixedClock::new(at(8)));
    let mut session = session(&storage, &clock);

    let mut early = Vec::new();
    for _ in 0..3 {
        early.push(session.add_task(NewTask::new("morning")).unwrap().id);
    }

    clock.set(at(12));
    for index in 0..5 {
        let id = session
            .add_task(NewTask::new(format!("due {index}")).due(at(18)))
            .unwrap()
            .id;
        session.toggle_complete(&id);
    }
    assert_eq!(session.unlocked().ids(), &[AchievementId::OnTime]);

    let focus = session.add_time_spent(&early[0], 120);
    assert_eq!(focus.unlocked, vec![AchievementId::DeepFocus]);

    session.toggle_complete(&early[0]);
    assert!(session.toggle_complete(&early[1]).unlocked.is_empty());

    // Third badge and the collector cannot land in the same pass.
    let third = session.toggle_complete(&early[2]);
    assert_eq!(third.unlocked, vec![AchievementId::EarlyBird]);
    assert!(!session.unlocked().contains(AchievementId::BadgeCollector));

    let next = session.add_task(NewTask::new("any change")).unwrap();
    assert_eq!(next.unlocked, vec![AchievementId::BadgeCollector]);
    assert_eq!(session.unlocked().len(), 4);
}

#[test]
fn unlocks_survive_later_mutations_and_reloads() {
    let storage = MemoryKeyValueStore::new();
    let clock = Rc::new(FixedClock::new(at(14)));
    {
        let mut session = session(&storage, &clock);
        let id = session.add_task(NewTask::new("focus")).unwrap().id;
        session.add_time_spent(&id, 130);
        assert!(session.unlocked().contains(AchievementId::DeepFocus));

        session.delete_task(&id);
        assert!(session.tasks().is_empty());
        assert!(session.unlocked().contains(AchievementId::DeepFocus));
    }

    assert_eq!(
        storage.get(ACHIEVEMENTS_KEY).unwrap().as_deref(),
        Some(r#"["deep_focus"]"#)
    );
    let reloaded = session(&storage, &clock);
    assert_eq!(reloaded.unlocked().ids(), &[AchievementId::DeepFocus]);
}

#[test]
fn unlock_set_never_shrinks_across_mixed_operations() {
    let storage = MemoryKeyValueStore::new();
    let clock = Rc::new(FixedClock::new(at(7)));
    let mut session = session(&storage, &clock);
    let mut previous = session.unlocked().clone();

    let mut ids = Vec::new();
    for step in 0..30u32 {
        clock.advance(Duration::minutes(17));
        match step % 5 {
            0 | 1 => {
                let request = NewTask::new(format!("step {step}")).due(at(22));
                ids.push(session.add_task(request).unwrap().id);
            }
            2 => {
                if let Some(id) = ids.first() {
                    session.toggle_complete(id);
                }
            }
            3 => {
                if let Some(id) = ids.last() {
                    session.add_time_spent(id, 45);
                }
            }
            _ => {
                if ids.len() > 2 {
                    let id = ids.remove(0);
                    session.delete_task(&id);
                }
            }
        }

        for id in previous.ids() {
            assert!(session.unlocked().contains(*id), "lost {id} at step {step}");
        }
        assert!(session.unlocked().len() >= previous.len());
        previous = session.unlocked().clone();
    }
}
