//! End-to-end tests for TodoApp against a real state file and a mocked seed endpoint.

use tempfile::tempdir;
use todo_seed::SeedClient;
use todo_store::{PersistedState, Priority, StateStore, StatusFilter, TodoApp};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_body() -> serde_json::Value {
    serde_json::json!([
        {"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false},
        {"userId": 1, "id": 2, "title": "quis ut nam facilis", "completed": false},
        {"userId": 1, "id": 3, "title": "fugiat veniam minus", "completed": false},
        {"userId": 1, "id": 4, "title": "et porro tempora", "completed": true},
        {"userId": 1, "id": 5, "title": "laboriosam mollitia", "completed": false}
    ])
}

#[tokio::test]
async fn test_first_run_seeds_from_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));
    let mut app = TodoApp::open(store.clone()).unwrap();
    assert!(app.needs_seed());

    let client = SeedClient::with_base_url(mock_server.uri()).unwrap();
    assert_eq!(app.seed(&client).await.unwrap(), 5);

    let ids: Vec<&str> = app.list().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert!(app.list().get("4").unwrap().completed);

    // Second run reads the snapshot and never hits the endpoint again
    let mut reopened = TodoApp::open_async(store).await.unwrap();
    assert!(!reopened.needs_seed());
    assert_eq!(reopened.seed(&client).await.unwrap(), 0);
    assert_eq!(reopened.list(), app.list());
}

#[tokio::test]
async fn test_failed_seed_starts_empty_and_retries_next_run() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));
    let client = SeedClient::with_base_url(mock_server.uri()).unwrap();

    let mut app = TodoApp::open(store.clone()).unwrap();
    assert_eq!(app.seed(&client).await.unwrap(), 0);
    assert!(app.list().is_empty());
    assert!(app.visible().is_empty());
    assert!(!store.exists());

    let app = TodoApp::open(store).unwrap();
    assert!(app.needs_seed());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_not_an_error() {
    // Grab a free port, then close it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let temp_dir = tempdir().expect("failed to create temp dir");
    let mut app = TodoApp::open(StateStore::with_path(temp_dir.path().join("state.json"))).unwrap();
    let client = SeedClient::with_base_url(uri).unwrap();

    assert_eq!(app.seed(&client).await.unwrap(), 0);
    assert!(!app.is_loading());
}

#[test]
fn test_mutations_survive_reopen() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));

    let mut app = TodoApp::open(store.clone()).unwrap();
    let milk = app.add("Buy milk").unwrap().unwrap().id;
    let dog = app.add("Walk the dog").unwrap().unwrap().id;
    app.toggle_featured(&milk).unwrap();
    app.set_priority(&dog, Priority::High).unwrap();
    app.toggle_completed(&dog).unwrap();
    app.edit_text(&milk, "Buy oat milk").unwrap();
    app.reorder(&milk, &dog).unwrap();
    app.set_dark_mode(true).unwrap();

    let reopened = TodoApp::open(store).unwrap();
    assert_eq!(reopened.list(), app.list());
    assert!(reopened.dark_mode());

    let first = &reopened.list().items()[0];
    assert_eq!(first.id, milk);
    assert_eq!(first.text, "Buy oat milk");
    assert!(first.featured);
}

#[test]
fn test_user_emptied_list_is_not_reseeded() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));

    let mut app = TodoApp::open(store.clone()).unwrap();
    let id = app.add("only").unwrap().unwrap().id;
    app.remove(&id).unwrap();

    assert_eq!(store.load().unwrap().todos, Some(Vec::new()));
    assert!(!TodoApp::open(store).unwrap().needs_seed());
}

#[test]
fn test_filter_is_not_persisted() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));

    let mut app = TodoApp::open(store.clone()).unwrap();
    app.add("a").unwrap();
    app.set_status(StatusFilter::Completed);
    assert!(app.visible().is_empty());

    let reopened = TodoApp::open(store).unwrap();
    assert_eq!(reopened.visible().len(), 1);
    assert!(!reopened.filter().is_active());
}

#[test]
fn test_open_with_corrupted_state_fails() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("state.json");
    std::fs::write(&path, "[1, 2").unwrap();

    assert!(TodoApp::open(StateStore::with_path(path)).is_err());
}

#[tokio::test]
async fn test_open_async_matches_open() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));

    let fresh = TodoApp::open_async(store.clone()).await.unwrap();
    assert!(fresh.needs_seed());
    assert!(fresh.list().is_empty());

    let mut app = TodoApp::open(store.clone()).unwrap();
    app.add("Buy milk").unwrap();
    app.set_dark_mode(true).unwrap();

    let reopened = TodoApp::open_async(store.clone()).await.unwrap();
    assert!(!reopened.needs_seed());
    assert_eq!(reopened.list(), app.list());
    assert!(reopened.dark_mode());

    std::fs::write(store.path(), "[1, 2").unwrap();
    assert!(TodoApp::open_async(store).await.is_err());
}

#[test]
fn test_duplicate_ids_on_disk_are_dropped() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));
    let json = r#"{"todos": [
        {"id": "1", "text": "first", "completed": false, "featured": false, "priority": 1, "createdAt": "2024-01-01T00:00:00Z"},
        {"id": "1", "text": "again", "completed": false, "featured": false, "priority": 2, "createdAt": "2024-01-01T00:00:00Z"}
    ]}"#;
    std::fs::write(store.path(), json).unwrap();

    let app = TodoApp::open(store).unwrap();
    assert_eq!(app.list().len(), 1);
    assert_eq!(app.list().items()[0].text, "first");
}

#[test]
fn test_snapshot_matches_disk_after_every_change() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = StateStore::with_path(temp_dir.path().join("state.json"));
    let mut app = TodoApp::open(store.clone()).unwrap();

    let id = app.add("a").unwrap().unwrap().id;
    assert_eq!(store.load().unwrap(), app.snapshot());
    app.toggle_completed(&id).unwrap();
    assert_eq!(store.load().unwrap(), app.snapshot());
    app.clear_completed().unwrap();
    assert_eq!(store.load().unwrap(), app.snapshot());
    assert_eq!(
        app.snapshot(),
        PersistedState {
            todos: Some(Vec::new()),
            dark_mode: None
        }
    );
}
