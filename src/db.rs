use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub type DbPool = SqlitePool;

/// Open the SQLite connection pool and run migrations.
///
/// `database_url` is a sqlx URL such as `sqlite://training-readiness.db?mode=rwc`
/// or `sqlite::memory:`.
pub async fn initialize_db(database_url: &str) -> Result<DbPool, Box<dyn std::error::Error>> {
  tracing::info!(database_url, "Initializing database");

  // A single connection keeps `sqlite::memory:` pointing at one database
  let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}
