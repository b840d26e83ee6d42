use btnotes_core::store::TASKS_KEY;
use btnotes_core::{
    load_json, save_json, seed_projects, seed_tasks, seed_team, MemorySessionStore, Priority,
    Project, Task, TaskId, TaskStatus, TaskType, TaskValidationError, TeamMember,
};

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::new(
        TaskId::new(1_770_000_000_000),
        "API credentials vault",
        TaskType::PasswordNote,
        Priority::new(5).unwrap(),
    )
    .unwrap();
    task.due_date = Some("2026-02-06".to_string());
    task.description = Some("Store with restricted access.".to_string());

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 1_770_000_000_000_i64);
    assert_eq!(json["type"], "Password Note");
    assert_eq!(json["priority"], 5);
    assert_eq!(json["status"], "pending");
    assert_eq!(json["dueDate"], "2026-02-06");
    assert_eq!(json["isProtected"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn absent_optional_fields_are_omitted_and_read_back_as_none() {
    let task = Task::new(TaskId::new(7), "bare", TaskType::Todo, Priority::DEFAULT).unwrap();
    let json = serde_json::to_value(&task).unwrap();
    assert!(json.get("dueDate").is_none());
    assert!(json.get("description").is_none());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.due_date, None);
    assert_eq!(decoded.description, None);
}

#[test]
fn blank_form_strings_in_persisted_json_decode_as_absent() {
    let value = serde_json::json!({
        "id": 1_770_000_000_001_i64,
        "title": "From a blank form",
        "type": "Todo",
        "priority": 3,
        "status": "pending",
        "dueDate": "",
        "description": "",
        "isProtected": false
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.due_date, None);
    assert_eq!(task.description, None);
}

#[test]
fn whitespace_only_description_decodes_as_absent() {
    let value = serde_json::json!({
        "id": 1_770_000_000_002_i64,
        "title": "Spaces only",
        "type": "Plan Note",
        "status": "complete",
        "dueDate": "  ",
        "description": "   ",
        "isProtected": false
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.due_date, None);
    assert_eq!(task.description, None);
}

#[test]
fn blank_description_is_invalid_so_valid_lists_survive_the_store() {
    let mut blank = Task::new(TaskId::new(7), "t", TaskType::Todo, Priority::DEFAULT).unwrap();
    blank.description = Some(String::new());
    assert_eq!(
        blank.validate(),
        Err(TaskValidationError::BlankOptionalField("description"))
    );

    let mut kept = Task::new(TaskId::new(8), "t", TaskType::Todo, Priority::DEFAULT).unwrap();
    kept.description = Some(" padded ".to_string());
    kept.due_date = Some("2026-02-04".to_string());
    kept.validate().unwrap();

    let tasks = vec![kept];
    let mut store = MemorySessionStore::new();
    save_json(&mut store, TASKS_KEY, &tasks).unwrap();
    let loaded: Vec<Task> = load_json(&store, TASKS_KEY, Vec::new());
    assert_eq!(loaded, tasks);
}

#[test]
fn deserialize_rejects_protected_flag_mismatch() {
    let value = serde_json::json!({
        "id": 3,
        "title": "vault",
        "type": "Password Note",
        "priority": 5,
        "status": "pending",
        "isProtected": false
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("does not match task type"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_unknown_status_and_priority() {
    let bad_status = serde_json::json!({
        "id": 1, "title": "x", "type": "Todo", "priority": 3,
        "status": "archived", "isProtected": false
    });
    assert!(serde_json::from_value::<Task>(bad_status).is_err());

    let bad_priority = serde_json::json!({
        "id": 1, "title": "x", "type": "Todo", "priority": 0,
        "status": "pending", "isProtected": false
    });
    assert!(serde_json::from_value::<Task>(bad_priority).is_err());
}

#[test]
fn collections_round_trip_through_json() {
    let tasks = seed_tasks();
    let encoded = serde_json::to_string(&tasks).unwrap();
    assert_eq!(serde_json::from_str::<Vec<Task>>(&encoded).unwrap(), tasks);

    let projects = seed_projects();
    let encoded = serde_json::to_string(&projects).unwrap();
    assert_eq!(
        serde_json::from_str::<Vec<Project>>(&encoded).unwrap(),
        projects
    );

    let team = seed_team();
    let encoded = serde_json::to_string(&team).unwrap();
    assert_eq!(serde_json::from_str::<Vec<TeamMember>>(&encoded).unwrap(), team);
}

#[test]
fn seed_tasks_match_expected_shape() {
    let tasks = seed_tasks();
    assert_eq!(tasks.len(), 3);
    assert_eq!(
        tasks.iter().map(|t| t.id.get()).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(tasks[1].status, TaskStatus::Complete);
    assert!(tasks[2].is_protected);
}
