//! SQLite connection and migrations.

use crate::error::AppError;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Shared database handle. Every use case takes it explicitly.
pub struct DbPool(pub Mutex<Connection>);

const MIGRATIONS: &[(i32, &str)] = &[
    (1, include_str!("../../migrations/0001_init.sql")),
    (2, include_str!("../../migrations/0002_show_lookup_indexes.sql")),
];

/// Initialize DB at path, run migrations, return the shared handle.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Db(e.to_string()))?;
        }
    }
    let conn = Connection::open(db_path)?;
    prepare(conn)
}

/// In-memory database with the full schema applied.
pub fn init_test_db() -> DbPool {
    let conn = Connection::open_in_memory().unwrap_or_else(|e| panic!("open in-memory db: {e}"));
    prepare(conn).unwrap_or_else(|e| panic!("migrate in-memory db: {e}"))
}

fn prepare(mut conn: Connection) -> Result<DbPool, AppError> {
    // Must be set outside of any transaction.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    register_functions(&conn)?;
    run_migrations(&mut conn)?;
    Ok(DbPool(Mutex::new(conn)))
}

/// `casefold(text)`: Unicode lowercase. The built-in `lower()` and `LIKE` only fold ASCII.
fn register_functions(conn: &Connection) -> Result<(), AppError> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )?;
    Ok(())
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // The scripts record themselves; the version row is written here instead.
        let statements = sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("applied migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

/// Lock the shared connection for the duration of one use case.
pub fn get_connection(pool: &DbPool) -> MutexGuard<'_, Connection> {
    // A panic while holding the lock leaves no half-applied transaction behind:
    // the transaction is rolled back when it is dropped during unwinding.
    pool.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_recorded_once() {
        let pool = init_test_db();
        let conn = get_connection(&pool);
        let versions: Vec<i32> = conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(versions, vec![1, 2]);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let pool = init_test_db();
        let conn = get_connection(&pool);
        let enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |r| r.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn casefold_lowercases_non_ascii() {
        let pool = init_test_db();
        let conn = get_connection(&pool);
        let folded: String = conn
            .query_row("SELECT casefold('CAFÉ Élan')", [], |r| r.get(0))
            .unwrap();
        assert_eq!(folded, "café élan");
        let null: Option<String> = conn
            .query_row("SELECT casefold(NULL)", [], |r| r.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn init_db_creates_parent_dir_and_reopens() {
        let dir = std::env::temp_dir().join(format!("fyyur-db-{}", std::process::id()));
        let path = dir.join("nested").join("app.db");
        {
            let pool = init_db(&path).unwrap();
            let conn = get_connection(&pool);
            conn.execute(
                "INSERT INTO artists (name, city, state, genres) VALUES ('A', 'B', 'CA', 'Jazz')",
                [],
            )
            .unwrap();
        }
        let pool = init_db(&path).unwrap();
        let conn = get_connection(&pool);
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM artists", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
        drop(conn);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
