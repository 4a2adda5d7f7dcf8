use nextcalls_core::db::migrations::latest_version;
use nextcalls_core::db::{open_db, open_db_in_memory, DbError};
use nextcalls_core::{
    SettingsError, SettingsRepository, SettingsService, SqliteSettingsRepository,
    DEFAULT_REMINDER_LIST, SELECTED_LIST_KEY,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "settings");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn selected_list_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.db");

    let settings = service_at(&path);
    settings.set_selected_list_name("  Werk  ").unwrap();
    drop(settings);

    let reopened = service_at(&path);
    assert_eq!(reopened.selected_list_name(), "Werk");
    assert!(reopened.has_selected_list());
}

#[test]
fn clearing_selection_persists_empty_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.db");

    let settings = service_at(&path);
    settings.reset_to_default().unwrap();
    settings.set_selected_list_name("").unwrap();
    drop(settings);

    let repo = SqliteSettingsRepository::new(open_db(&path).unwrap());
    assert_eq!(repo.get(SELECTED_LIST_KEY).unwrap(), Some(String::new()));
}

#[test]
fn reset_selects_default_and_notifies_once() {
    let settings = SettingsService::new(SqliteSettingsRepository::new(
        open_db_in_memory().unwrap(),
    ))
    .unwrap();
    let mut selection = settings.subscribe();

    settings.reset_to_default().unwrap();
    assert!(selection.has_changed().unwrap());
    assert_eq!(*selection.borrow_and_update(), DEFAULT_REMINDER_LIST);

    settings.reset_to_default().unwrap();
    assert!(!selection.has_changed().unwrap());
}

#[test]
fn invalid_name_leaves_selection_untouched() {
    let settings = SettingsService::new(SqliteSettingsRepository::new(
        open_db_in_memory().unwrap(),
    ))
    .unwrap();
    settings.set_selected_list_name("Werk").unwrap();

    let err = settings.set_selected_list_name("Werk\nPrive").unwrap_err();

    assert!(matches!(err, SettingsError::InvalidListName(_)));
    assert_eq!(settings.selected_list_name(), "Werk");
}

fn service_at(path: &std::path::Path) -> SettingsService<SqliteSettingsRepository> {
    let repo = SqliteSettingsRepository::new(open_db(path).unwrap());
    SettingsService::new(repo).unwrap()
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "missing table `{table_name}`");
}
