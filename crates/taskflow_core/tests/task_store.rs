use chrono::{DateTime, Local, TimeZone};
use std::collections::HashSet;
use std::rc::Rc;
use taskflow_core::{
    Category, FixedClock, MemoryKeyValueStore, NewTask, Priority, SequentialIdSource,
    SessionOptions, TaskId, TaskPatch, TaskSession, TaskValidationError, UuidIdSource,
};

fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).single().unwrap()
}

fn session(storage: &MemoryKeyValueStore) -> TaskSession<&MemoryKeyValueStore> {
    TaskSession::restore(
        storage,
        SessionOptions::default(),
        Box::new(Rc::new(FixedClock::new(noon()))),
        Box::new(SequentialIdSource::new()),
    )
}

#[test]
fn add_creates_open_task_at_front_with_defaults() {
    let storage = MemoryKeyValueStore::new();
    let mut session = session(&storage);

    let first = session.add_task(NewTask::new("first")).unwrap();
    let second = session
        .add_task(
            NewTask::new("second")
                .category(Category::Work)
                .priority(Priority::High)
                .notes("bring slides"),
        )
        .unwrap();

    let tasks = session.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, second.id);
    assert_eq!(tasks[1].id, first.id);

    let created = &tasks[1];
    assert!(!created.completed);
    assert_eq!(created.time_spent_minutes(), 0);
    assert_eq!(created.created_at(), noon());
    assert_eq!(created.category, Category::Other);
    assert_eq!(created.priority, Priority::Medium);
    assert_eq!(created.due_date, None);

    assert_eq!(tasks[0].notes.as_deref(), Some("bring slides"));
}

#[test]
fn empty_title_is_rejected_without_mutation() {
    let storage = MemoryKeyValueStore::new();
    let mut session = session(&storage);
    session.add_task(NewTask::new("keep")).unwrap();

    let err = session.add_task(NewTask::new("   ")).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
    assert_eq!(session.tasks().len(), 1);
}

#[test]
fn size_tracks_adds_minus_deletes_and_ids_stay_distinct() {
    let storage = MemoryKeyValueStore::new();
    let mut session = TaskSession::restore(
        &storage,
        SessionOptions::default(),
        Box::new(Rc::new(FixedClock::new(noon()))),
        Box::new(UuidIdSource),
    );

    let mut ids = Vec::new();
    for index in 0..20 {
        ids.push(session.add_task(NewTask::new(format!("task {index}"))).unwrap().id);
    }
    let mut deletes = 0;
    for id in ids.iter().step_by(3) {
        assert!(session.delete_task(id).applied);
        deletes += 1;
    }

    assert_eq!(session.tasks().len(), ids.len() - deletes);
    let unique: HashSet<&TaskId> = session.tasks().iter().map(|task| &task.id).collect();
    assert_eq!(unique.len(), session.tasks().len());
    let all_unique: HashSet<&TaskId> = ids.iter().collect();
    assert_eq!(all_unique.len(), ids.len());
}

#[test]
fn toggle_twice_restores_completion() {
    let storage = MemoryKeyValueStore::new();
    let mut session = session(&storage);
    let id = session.add_task(NewTask::new("flip me")).unwrap().id;

    assert!(session.toggle_complete(&id).applied);
    assert!(session.task(&id).unwrap().completed);
    assert!(session.toggle_complete(&id).applied);
    assert!(!session.task(&id).unwrap().completed);
}

#[test]
fn time_spent_is_additive() {
    let storage = MemoryKeyValueStore::new();
    let mut session = session(&storage);
    let split = session.add_task(NewTask::new("split")).unwrap().id;
    let single = session.add_task(NewTask::new("single")).unwrap().id;

    session.add_time_spent(&split, 25);
    session.add_time_spent(&split, 40);
    session.add_time_spent(&single, 65);

    assert_eq!(session.task(&split).unwrap().time_spent_minutes(), 65);
    assert_eq!(
        session.task(&split).unwrap().time_spent_minutes(),
        session.task(&single).unwrap().time_spent_minutes()
    );
}

#[test]
fn missing_ids_are_noops() {
    let storage = MemoryKeyValueStore::new();
    let mut session = session(&storage);
    session.add_task(NewTask::new("only")).unwrap();
    let before = session.tasks().to_vec();
    let missing = TaskId::new("missing");

    assert!(!session.delete_task(&missing).applied);
    assert!(!session.toggle_complete(&missing).applied);
    assert!(!session.add_time_spent(&missing, 10).applied);
    let patch = TaskPatch {
        title: Some("renamed".to_string()),
        ..TaskPatch::default()
    };
    assert!(!session.edit_task(&missing, &patch).unwrap().applied);

    assert_eq!(session.tasks(), before.as_slice());
}

#[test]
fn edit_keeps_immutable_fields() {
    let storage = MemoryKeyValueStore::new();
    let mut session = session(&storage);
    let id = session.add_task(NewTask::new("draft").notes("old")).unwrap().id;
    session.toggle_complete(&id);
    session.add_time_spent(&id, 30);

    let due = Local.with_ymd_and_hms(2026, 3, 12, 9, 0, 0).single().unwrap();
    let patch = TaskPatch {
        title: Some(" final ".to_string()),
        due_date: Some(Some(due)),
        category: Some(Category::Education),
        priority: Some(Priority::Low),
        notes: Some(None),
    };
    assert!(session.edit_task(&id, &patch).unwrap().applied);

    let task = session.task(&id).unwrap();
    assert_eq!(task.title, "final");
    assert_eq!(task.due_date, Some(due));
    assert_eq!(task.category, Category::Education);
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.notes, None);
    assert!(task.completed);
    assert_eq!(task.time_spent_minutes(), 30);
    assert_eq!(task.created_at(), noon());

    let blank = TaskPatch {
        title: Some(String::new()),
        ..TaskPatch::default()
    };
    assert_eq!(
        session.edit_task(&id, &blank).unwrap_err(),
        TaskValidationError::EmptyTitle
    );
    assert_eq!(session.task(&id).unwrap().title, "final");
}
