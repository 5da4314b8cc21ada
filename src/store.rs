use crate::db::DbPool;
use crate::models::{DocumentKey, StoredDocument};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Invalid stored payload: {0}")]
  Payload(#[from] serde_json::Error),

  #[error("Store unavailable: {0}")]
  Unavailable(String),
}

impl Serialize for StoreError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Document Store Interface
/// ---------------------------------------------------------------------------

/// Narrow key-value interface over whatever holds cached upstream data.
pub trait DocumentStore {
  fn read(
    &self,
    key: &DocumentKey,
  ) -> impl Future<Output = Result<Option<StoredDocument>, StoreError>> + Send;

  fn write(
    &self,
    key: &DocumentKey,
    document: StoredDocument,
  ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// ---------------------------------------------------------------------------
/// SQLite Store
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteStore {
  db: DbPool,
}

impl SqliteStore {
  pub fn new(db: DbPool) -> Self {
    Self { db }
  }
}

impl DocumentStore for SqliteStore {
  async fn read(&self, key: &DocumentKey) -> Result<Option<StoredDocument>, StoreError> {
    let row: Option<(String, DateTime<Utc>)> = sqlx::query_as(
      "SELECT payload, cached_at FROM documents WHERE owner_id = ?1 AND kind = ?2",
    )
    .bind(&key.owner_id)
    .bind(key.kind.as_str())
    .fetch_optional(&self.db)
    .await?;

    match row {
      Some((payload, cached_at)) => Ok(Some(StoredDocument {
        payload: serde_json::from_str(&payload)?,
        cached_at,
      })),
      None => Ok(None),
    }
  }

  async fn write(&self, key: &DocumentKey, document: StoredDocument) -> Result<(), StoreError> {
    let payload = serde_json::to_string(&document.payload)?;

    sqlx::query(
      r#"
      INSERT INTO documents (owner_id, kind, payload, cached_at)
      VALUES (?1, ?2, ?3, ?4)
      ON CONFLICT(owner_id, kind) DO UPDATE SET
        payload = excluded.payload,
        cached_at = excluded.cached_at
      "#,
    )
    .bind(&key.owner_id)
    .bind(key.kind.as_str())
    .bind(&payload)
    .bind(document.cached_at)
    .execute(&self.db)
    .await?;

    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// In-Memory Store
/// ---------------------------------------------------------------------------

/// Process-local store, used in tests and when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
  documents: Mutex<HashMap<DocumentKey, StoredDocument>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn document_count(&self) -> Result<usize, StoreError> {
    let documents = self
      .documents
      .lock()
      .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    Ok(documents.len())
  }
}

impl DocumentStore for MemoryStore {
  async fn read(&self, key: &DocumentKey) -> Result<Option<StoredDocument>, StoreError> {
    let documents = self
      .documents
      .lock()
      .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    Ok(documents.get(key).cloned())
  }

  async fn write(&self, key: &DocumentKey, document: StoredDocument) -> Result<(), StoreError> {
    let mut documents = self
      .documents
      .lock()
      .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    documents.insert(key.clone(), document);
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
