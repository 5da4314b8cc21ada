//! Test utilities shared by the unit tests
//!
//! This module provides:
//! - Database setup/teardown
//! - A manually advanced clock
//! - Store and upstream stand-ins
//! - Mock data factories

use crate::activities::ActivitySource;
use crate::cache::Clock;
use crate::models::{DocumentKey, StoredDocument, TrainingLoadSnapshot};
use crate::store::{DocumentStore, StoreError};
use crate::strava::{StravaActivity, StravaError};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Fixed instant from a unix timestamp
pub fn datetime_at(seconds: i64) -> DateTime<Utc> {
  DateTime::from_timestamp(seconds, 0).expect("timestamp in range")
}

/// Clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
  now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>) -> Self {
    Self {
      now: Arc::new(Mutex::new(start)),
    }
  }

  pub fn advance(&self, by: Duration) {
    let mut now = self.now.lock().expect("clock lock poisoned");
    *now += by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock().expect("clock lock poisoned")
  }
}

/// ---------------------------------------------------------------------------
/// Stand-ins
/// ---------------------------------------------------------------------------

/// Store whose every call fails, for exercising the fallback paths
#[derive(Debug, Clone, Copy)]
pub struct FailingStore;

impl DocumentStore for FailingStore {
  async fn read(&self, _key: &DocumentKey) -> Result<Option<StoredDocument>, StoreError> {
    Err(StoreError::Unavailable("read refused".into()))
  }

  async fn write(&self, _key: &DocumentKey, _document: StoredDocument) -> Result<(), StoreError> {
    Err(StoreError::Unavailable("write refused".into()))
  }
}

/// Upstream source that returns canned activities and counts calls
#[derive(Debug, Clone)]
pub struct StubSource {
  activities: Option<Vec<StravaActivity>>,
  calls: Arc<AtomicUsize>,
}

impl StubSource {
  pub fn returning(activities: Vec<StravaActivity>) -> Self {
    Self {
      activities: Some(activities),
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn unauthorized() -> Self {
    Self {
      activities: None,
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl ActivitySource for StubSource {
  fn fetch_activities(
    &self,
    _access_token: &str,
  ) -> impl Future<Output = Result<Vec<StravaActivity>, StravaError>> + Send {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let result = self.activities.clone().ok_or(StravaError::NotAuthenticated);
    async move { result }
  }
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a mock Strava activity for testing
pub fn mock_strava_activity() -> StravaActivity {
  StravaActivity {
    id: 123456,
    name: "Morning Run".to_string(),
    activity_type: "Run".to_string(),
    start_date: datetime_at(1_699_990_000),
    elapsed_time: 3600,
    moving_time: 3600,
    distance: Some(10000.0),
    total_elevation_gain: Some(100.0),
    average_heartrate: Some(145.0),
    max_heartrate: Some(165.0),
    average_watts: None,
    suffer_score: Some(50.0),
  }
}

/// Create a mock training-load snapshot (fit athlete, moderately fatigued)
pub fn mock_training_load_snapshot() -> TrainingLoadSnapshot {
  TrainingLoadSnapshot::new(72.0, 85.0, -13.0)
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'documents'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_manual_clock_clones_share_time() {
    let clock = ManualClock::new(datetime_at(0));
    let other = clock.clone();

    clock.advance(Duration::minutes(90));

    assert_eq!(other.now(), datetime_at(5400));
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let activity = mock_strava_activity();
    assert_eq!(activity.activity_type, "Run");
    assert_eq!(activity.distance, Some(10000.0));

    let snapshot = mock_training_load_snapshot();
    assert!(!snapshot.is_empty());
    crate::assert_approx_eq!(snapshot.ctl - snapshot.atl, snapshot.tsb, 1e-9);
  }
}
