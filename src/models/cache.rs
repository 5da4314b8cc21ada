use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of upstream data held in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
  StravaActivities,
}

impl DataKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      DataKind::StravaActivities => "strava_activities",
    }
  }
}

impl fmt::Display for DataKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Store key: one document per (owner, data kind)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
  pub owner_id: String,
  pub kind: DataKind,
}

impl DocumentKey {
  pub fn new(owner_id: impl Into<String>, kind: DataKind) -> Self {
    Self {
      owner_id: owner_id.into(),
      kind,
    }
  }
}

impl fmt::Display for DocumentKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner_id, self.kind)
  }
}

/// Raw record as it sits in the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
  pub payload: serde_json::Value,
  pub cached_at: DateTime<Utc>,
}

/// Typed cache entry handed out by the cache gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
  pub payload: T,
  pub cached_at: DateTime<Utc>,
}
