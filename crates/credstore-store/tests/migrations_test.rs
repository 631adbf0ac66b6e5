// Integration tests for the migration framework

use credstore_store::migrations::{applied_migrations, apply_migrations};
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    let result = apply_migrations(&mut conn);

    // Then: All migrations succeed
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    // And: Both domain tables exist next to the bookkeeping tables
    let tables = get_table_names(&conn);
    for expected_table in ["schema_version", "users", "produtos", "sqlite_sequence"] {
        assert!(
            tables.contains(&expected_table.to_string()),
            "Missing table: {}",
            expected_table
        );
    }
}

#[test]
fn test_migration_idempotency() {
    // Given: A database with migrations already applied
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    // When: Migrations are re-run
    let result = apply_migrations(&mut conn);

    // Then: Re-running succeeds without duplicate version entries
    assert!(result.is_ok(), "Re-running migrations should succeed");
    assert_eq!(applied_migrations(&conn).unwrap().len(), 2);
}

#[test]
fn test_checksum_recorded() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    let checksum: String = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            ["001_users"],
            |row| row.get(0),
        )
        .unwrap();

    assert_eq!(checksum.len(), 64, "SHA256 checksum should be 64 hex chars");
}

#[test]
fn test_existing_users_table_is_adopted() {
    // Given: A database created before migrations were tracked
    let mut conn = setup_test_db();
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL
        );
        INSERT INTO users (username, password) VALUES ('legacy', 'abc');",
    )
    .unwrap();

    // When: Migrations are applied
    apply_migrations(&mut conn).unwrap();

    // Then: Existing rows survive
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_username_unique_constraint() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    conn.execute(
        "INSERT INTO users (username, password) VALUES ('alice', 'x')",
        [],
    )
    .unwrap();
    let duplicate = conn.execute(
        "INSERT INTO users (username, password) VALUES ('alice', 'y')",
        [],
    );

    assert!(duplicate.is_err(), "UNIQUE constraint should reject duplicate");
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap();

    let tables = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();

    tables
}
