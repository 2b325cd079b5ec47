use std::str::FromStr;

use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool,
};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    );"#,
    r#"CREATE TABLE IF NOT EXISTS todo_lists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    );"#,
    r#"CREATE TABLE IF NOT EXISTS users_lists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        list_id INTEGER NOT NULL REFERENCES todo_lists (id) ON DELETE CASCADE
    );"#,
    r#"CREATE TABLE IF NOT EXISTS todo_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        done BOOLEAN NOT NULL DEFAULT 0
    );"#,
    r#"CREATE TABLE IF NOT EXISTS lists_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id INTEGER NOT NULL REFERENCES todo_items (id) ON DELETE CASCADE,
        list_id INTEGER NOT NULL REFERENCES todo_lists (id) ON DELETE CASCADE
    );"#,
    "CREATE INDEX IF NOT EXISTS idx_users_lists_user ON users_lists (user_id, list_id);",
    "CREATE INDEX IF NOT EXISTS idx_lists_items_list ON lists_items (list_id, item_id);",
];

/// Opens (and creates, if needed) the database at `database_url` and makes sure the tables exist.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Check if the database exists, if not, create it
    if !Sqlite::database_exists(database_url).await? {
        tracing::info!("Creating database {}", database_url);
        Sqlite::create_database(database_url).await?;
    }

    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database. Every connection to `sqlite::memory:` is its own
/// database, so the one connection is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("database schema ready");
    Ok(())
}
