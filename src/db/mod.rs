pub mod queries;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Error, SqlitePool};

pub use queries::categories::Category;
pub use queries::questions::Question;

pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new().connect_with(options).await
}

/// Single-connection in-memory pool. Every connection gets its own in-memory
/// database, so the pool must never grow past one.
pub async fn connect_in_memory() -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::new().in_memory(true).foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
