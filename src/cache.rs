//! Time-bounded cache over the document store.
//!
//! Entries are fresh while `now - cached_at < CACHE_TTL`. Stale entries stay
//! in the store until the next `put` overwrites them, but `get` never hands
//! them out. Store read failures are reported as a miss so the caller always
//! falls back to refetching upstream.

use crate::models::{CacheEntry, DataKind, DocumentKey, StoredDocument};
use crate::store::{DocumentStore, StoreError};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Freshness window for cached upstream data
pub const CACHE_TTL_SECONDS: i64 = 3600;

pub fn cache_ttl() -> Duration {
  Duration::seconds(CACHE_TTL_SECONDS)
}

/// ---------------------------------------------------------------------------
/// Clock
/// ---------------------------------------------------------------------------

pub trait Clock {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// ---------------------------------------------------------------------------
/// Freshness
/// ---------------------------------------------------------------------------

/// A `cached_at` ahead of `now` gives a negative age and counts as fresh.
pub fn is_fresh(now: DateTime<Utc>, cached_at: DateTime<Utc>, ttl: Duration) -> bool {
  now - cached_at < ttl
}

/// ---------------------------------------------------------------------------
/// Cache Gate
/// ---------------------------------------------------------------------------

pub struct CacheGate<T, S, C = SystemClock> {
  store: S,
  clock: C,
  kind: DataKind,
  ttl: Duration,
  _payload: PhantomData<fn() -> T>,
}

impl<T, S, C> CacheGate<T, S, C>
where
  T: Serialize + DeserializeOwned,
  S: DocumentStore,
  C: Clock,
{
  pub fn new(store: S, clock: C, kind: DataKind) -> Self {
    Self {
      store,
      clock,
      kind,
      ttl: cache_ttl(),
      _payload: PhantomData,
    }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  fn key(&self, owner_id: &str) -> DocumentKey {
    DocumentKey::new(owner_id, self.kind)
  }

  /// Return the cached payload for `owner_id` if it is still fresh.
  ///
  /// `None` covers absent entries, stale entries, unreadable payloads and
  /// store failures alike.
  pub async fn get(&self, owner_id: &str) -> Option<T> {
    self.get_entry(owner_id).await.map(|entry| entry.payload)
  }

  /// Same as [`CacheGate::get`] but keeps the timestamp alongside the payload.
  pub async fn get_entry(&self, owner_id: &str) -> Option<CacheEntry<T>> {
    let key = self.key(owner_id);

    let document = match self.store.read(&key).await {
      Ok(Some(document)) => document,
      Ok(None) => {
        tracing::debug!(%key, "Cache miss: no entry");
        return None;
      }
      Err(e) => {
        tracing::warn!(%key, error = %e, "Cache read failed, treating as miss");
        return None;
      }
    };

    let now = self.clock.now();
    if !is_fresh(now, document.cached_at, self.ttl) {
      tracing::debug!(
        %key,
        age_seconds = (now - document.cached_at).num_seconds(),
        "Cache miss: entry is stale"
      );
      return None;
    }

    match serde_json::from_value(document.payload) {
      Ok(payload) => {
        tracing::debug!(%key, "Cache hit");
        Some(CacheEntry {
          payload,
          cached_at: document.cached_at,
        })
      }
      Err(e) => {
        tracing::warn!(%key, error = %e, "Cached payload did not deserialize, treating as miss");
        None
      }
    }
  }

  /// Overwrite the entry for `owner_id`, stamping it with the current time.
  pub async fn put(&self, owner_id: &str, payload: &T) -> Result<(), StoreError> {
    let key = self.key(owner_id);
    let document = StoredDocument {
      payload: serde_json::to_value(payload)?,
      cached_at: self.clock.now(),
    };

    self.store.write(&key, document).await?;
    tracing::debug!(%key, "Cache entry written");

    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
