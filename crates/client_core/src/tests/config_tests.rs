use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

fn write_config(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(CONFIG_FILE), contents).expect("write config");
    dir
}

#[test]
fn defaults_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join(CONFIG_FILE), env_from(&[]));
    assert!(settings.api_key.is_none());
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert!(settings.database_url.is_none());
    assert_eq!(settings.page, 1);
}

#[test]
fn file_values_are_applied() {
    let dir = write_config(
        r#"
        api_key = "from-file"
        api_base_url = "http://localhost:9000/3"
        database_url = "./data/test.db"
        page = 4
        "#,
    );
    let settings = load_settings_from(&dir.path().join(CONFIG_FILE), env_from(&[]));
    assert_eq!(settings.api_key.as_deref(), Some("from-file"));
    assert_eq!(settings.api_base_url, "http://localhost:9000/3");
    assert_eq!(settings.database_url.as_deref(), Some("./data/test.db"));
    assert_eq!(settings.page, 4);
}

#[test]
fn environment_beats_file_and_prefixed_name_beats_bare() {
    let dir = write_config(r#"api_key = "from-file""#);
    let settings = load_settings_from(
        &dir.path().join(CONFIG_FILE),
        env_from(&[("TMDB_API_KEY", "bare"), ("APP__API_KEY", "prefixed")]),
    );
    assert_eq!(settings.api_key.as_deref(), Some("prefixed"));

    let settings = load_settings_from(
        &dir.path().join(CONFIG_FILE),
        env_from(&[("TMDB_API_KEY", "bare"), ("APP__API_KEY", "  ")]),
    );
    assert_eq!(settings.api_key.as_deref(), Some("bare"));
}

#[test]
fn overrides_beat_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join(CONFIG_FILE),
        env_from(&[("TMDB_API_KEY", "env"), ("APP__PAGE", "3")]),
    )
    .apply(SettingsOverrides {
        api_key: Some("flag".to_string()),
        page: Some(7),
        ..SettingsOverrides::default()
    });
    assert_eq!(settings.api_key.as_deref(), Some("flag"));
    assert_eq!(settings.page, 7);
}

#[test]
fn invalid_page_values_are_ignored() {
    let dir = write_config(r#"page = "zero""#);
    let settings =
        load_settings_from(&dir.path().join(CONFIG_FILE), env_from(&[("APP__PAGE", "0")]));
    assert_eq!(settings.page, DEFAULT_PAGE);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = write_config("api_key = [unterminated");
    let settings = load_settings_from(&dir.path().join(CONFIG_FILE), env_from(&[]));
    assert!(settings.api_key.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let settings = Settings {
        api_key: Some("hunter2".to_string()),
        ..Settings::default()
    };
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url(" sqlite://already.db "),
        "sqlite://already.db"
    );
}

#[test]
fn resolves_default_database_under_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings {
        data_dir: Some(dir.path().to_path_buf()),
        ..Settings::default()
    };
    let url = settings.resolved_database_url().expect("url");
    assert!(url.starts_with("sqlite://"));
    assert!(url.ends_with("/profile.sqlite3"));
}

#[test]
fn explicit_database_url_wins_over_data_dir() {
    let settings = Settings {
        database_url: Some("./custom.db".to_string()),
        data_dir: Some(PathBuf::from("/unused")),
        ..Settings::default()
    };
    assert_eq!(
        settings.resolved_database_url().expect("url"),
        "sqlite://./custom.db"
    );
}
