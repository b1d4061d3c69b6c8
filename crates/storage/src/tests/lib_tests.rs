use super::*;

use shared::domain::ProfileId;

#[tokio::test]
async fn missing_profile_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage.get_user().await.expect("get").is_none());
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn saved_profile_reads_back_unchanged() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let user = UserProfile::singleton("Ada Lovelace", "ada@example.com", "555-0100");
    storage.insert_user(&user).await.expect("insert");

    let loaded = storage.get_user().await.expect("get").expect("some user");
    assert_eq!(loaded, user);
}

#[tokio::test]
async fn second_save_replaces_first() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .insert_user(&UserProfile::singleton("first", "first@example.com", "1"))
        .await
        .expect("first insert");
    storage
        .insert_user(&UserProfile::singleton("second", "second@example.com", "2"))
        .await
        .expect("second insert");

    let loaded = storage.get_user().await.expect("get").expect("some user");
    assert_eq!(loaded.name, "second");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
        .fetch_one(&storage.pool)
        .await
        .expect("count");
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn empty_fields_are_accepted() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let user = UserProfile::singleton("", "", "");
    storage.insert_user(&user).await.expect("insert");
    assert_eq!(storage.get_user().await.expect("get"), Some(user));
}

#[tokio::test]
async fn non_singleton_id_still_occupies_the_single_slot() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .insert_user(&UserProfile::singleton("one", "a", "b"))
        .await
        .expect("insert");
    let other = UserProfile {
        id: ProfileId(42),
        name: "other".to_string(),
        email: "c".to_string(),
        phone: "d".to_string(),
    };
    storage.insert_user(&other).await.expect("insert other");

    assert_eq!(storage.get_user().await.expect("get"), Some(other));
}

#[tokio::test]
async fn corrupt_profile_value_is_an_error() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .put_value(PROFILE_KEY, b"not json")
        .await
        .expect("raw put");
    let err = storage.get_user().await.expect_err("decode should fail");
    assert!(err.to_string().contains(PROFILE_KEY));
}

#[tokio::test]
async fn records_last_update_time() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage
        .last_updated(PROFILE_KEY)
        .await
        .expect("timestamp")
        .is_none());

    let before = Utc::now() - chrono::Duration::seconds(1);
    storage
        .insert_user(&UserProfile::placeholder())
        .await
        .expect("insert");
    let stamp = storage
        .last_updated(PROFILE_KEY)
        .await
        .expect("timestamp")
        .expect("some timestamp");
    assert!(stamp >= before);
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("profile.sqlite3");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn memory_store_replaces_values() {
    let store = MemoryStore::new();
    assert!(store.is_empty().await);
    assert!(store.get_user().await.expect("get").is_none());

    store
        .insert_user(&UserProfile::singleton("a", "a@example.com", "1"))
        .await
        .expect("insert");
    store
        .insert_user(&UserProfile::singleton("b", "b@example.com", "2"))
        .await
        .expect("insert");

    assert_eq!(store.len().await, 1);
    assert_eq!(
        store.get_user().await.expect("get").map(|u| u.name),
        Some("b".to_string())
    );
}

#[test]
fn sqlite_path_ignores_memory_and_query_suffix() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/app.db?mode=rwc"),
        Some(PathBuf::from("./data/app.db"))
    );
    assert_eq!(sqlite_path("postgres://localhost/db"), None);
}

#[tokio::test]
async fn in_memory_pool_keeps_a_connection_open() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(storage.pool.options().get_min_connections(), 1);

    storage
        .insert_user(&UserProfile::singleton("kept", "", ""))
        .await
        .expect("insert");
    let loaded = storage.get_user().await.expect("get").expect("some user");
    assert_eq!(loaded.name, "kept");
}

#[tokio::test]
async fn file_pool_may_drop_idle_connections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("idle.sqlite3").display());
    let storage = Storage::new(&url).await.expect("db");
    assert_eq!(storage.pool.options().get_min_connections(), 0);
}

#[test]
fn memory_urls_are_detected() {
    assert!(is_in_memory("sqlite::memory:"));
    assert!(is_in_memory("sqlite://file:shared?mode=memory&cache=shared"));
    assert!(!is_in_memory("sqlite://./data/app.db?mode=rwc"));
}
