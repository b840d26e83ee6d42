use btnotes_core::store::{AUTH_KEY, PROJECTS_KEY, TASKS_KEY, TEAM_KEY};
use btnotes_core::{
    load_json, save_json, seed_projects, seed_tasks, seed_team, MemorySessionStore, Project,
    SessionStore, SqliteSessionStore, Task, TeamMember,
};

#[test]
fn sqlite_store_get_set_remove() {
    let mut store = SqliteSessionStore::open_in_memory().unwrap();
    assert_eq!(store.get(AUTH_KEY).unwrap(), None);

    store.set(AUTH_KEY, "demo-token-1").unwrap();
    store.set(AUTH_KEY, "demo-token-2").unwrap();
    assert_eq!(store.get(AUTH_KEY).unwrap().as_deref(), Some("demo-token-2"));

    store.remove(AUTH_KEY).unwrap();
    store.remove(AUTH_KEY).unwrap();
    assert_eq!(store.get(AUTH_KEY).unwrap(), None);
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.sqlite3");

    let mut first = SqliteSessionStore::open(&path).unwrap();
    save_json(&mut first, TASKS_KEY, &seed_tasks()).unwrap();
    drop(first);

    let second = SqliteSessionStore::open(&path).unwrap();
    let loaded: Vec<Task> = load_json(&second, TASKS_KEY, Vec::new());
    assert_eq!(loaded, seed_tasks());
}

#[test]
fn sqlite_store_clear_removes_every_key() {
    let mut store = SqliteSessionStore::open_in_memory().unwrap();
    store.set(TEAM_KEY, "[]").unwrap();
    store.set(AUTH_KEY, "demo-token-9").unwrap();
    assert_eq!(store.keys().unwrap(), vec![TEAM_KEY, AUTH_KEY]);

    store.clear().unwrap();
    assert!(store.keys().unwrap().is_empty());
}

#[test]
fn all_collections_round_trip_through_both_stores() {
    let mut memory = MemorySessionStore::new();
    let mut sqlite = SqliteSessionStore::open_in_memory().unwrap();

    round_trip(&mut memory);
    round_trip(&mut sqlite);
}

fn round_trip(store: &mut dyn SessionStore) {
    let mut tasks = seed_tasks();
    tasks.reverse();
    save_json(&mut *store, TASKS_KEY, &tasks).unwrap();
    save_json(&mut *store, PROJECTS_KEY, &seed_projects()).unwrap();
    save_json(&mut *store, TEAM_KEY, &seed_team()).unwrap();

    assert_eq!(load_json::<Vec<Task>, _>(&*store, TASKS_KEY, Vec::new()), tasks);
    assert_eq!(
        load_json::<Vec<Project>, _>(&*store, PROJECTS_KEY, Vec::new()),
        seed_projects()
    );
    assert_eq!(
        load_json::<Vec<TeamMember>, _>(&*store, TEAM_KEY, Vec::new()),
        seed_team()
    );
}

#[test]
fn invalid_records_fall_back_to_seed() {
    let mut store = MemorySessionStore::new();
    store
        .set(
            PROJECTS_KEY,
            r#"[{"id":1,"name":"x","lead":"y","status":"On Track","progress":150}]"#,
        )
        .unwrap();

    let projects: Vec<Project> = load_json(&store, PROJECTS_KEY, seed_projects());
    assert_eq!(projects, seed_projects());
}
