use crate::cache::{CacheGate, Clock, SystemClock};
use crate::models::DataKind;
use crate::store::DocumentStore;
use crate::strava::{StravaActivity, StravaClient, StravaError};
use serde::Serialize;
use std::future::Future;

/// ---------------------------------------------------------------------------
/// Upstream Source
/// ---------------------------------------------------------------------------

/// Anything that can fetch an athlete's activity list from upstream.
pub trait ActivitySource {
  fn fetch_activities(
    &self,
    access_token: &str,
  ) -> impl Future<Output = Result<Vec<StravaActivity>, StravaError>> + Send;
}

impl ActivitySource for StravaClient {
  fn fetch_activities(
    &self,
    access_token: &str,
  ) -> impl Future<Output = Result<Vec<StravaActivity>, StravaError>> + Send {
    StravaClient::fetch_activities(self, access_token)
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
  #[error("Upstream fetch failed: {0}")]
  Upstream(#[from] StravaError),
}

impl Serialize for ActivityError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Activity Service (cache first, refetch on miss)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeed {
  pub activities: Vec<StravaActivity>,
  pub from_cache: bool,
}

pub struct ActivityService<S, F, C = SystemClock> {
  cache: CacheGate<Vec<StravaActivity>, S, C>,
  source: F,
}

impl<S, F, C> ActivityService<S, F, C>
where
  S: DocumentStore,
  F: ActivitySource,
  C: Clock,
{
  pub fn new(store: S, source: F, clock: C) -> Self {
    Self {
      cache: CacheGate::new(store, clock, DataKind::StravaActivities),
      source,
    }
  }

  pub fn cache(&self) -> &CacheGate<Vec<StravaActivity>, S, C> {
    &self.cache
  }

  /// Serve cached activities for `owner_id`, or refetch and repopulate the
  /// cache when there is no fresh entry.
  pub async fn recent_activities(
    &self,
    owner_id: &str,
    access_token: &str,
  ) -> Result<ActivityFeed, ActivityError> {
    if let Some(activities) = self.cache.get(owner_id).await {
      tracing::info!(owner_id, count = activities.len(), "Serving activities from cache");
      return Ok(ActivityFeed {
        activities,
        from_cache: true,
      });
    }

    let activities = self.source.fetch_activities(access_token).await?;

    // The fetched data is still good even if we could not cache it
    if let Err(e) = self.cache.put(owner_id, &activities).await {
      tracing::warn!(owner_id, error = %e, "Failed to cache activities");
    }

    tracing::info!(owner_id, count = activities.len(), "Refetched activities from upstream");

    Ok(ActivityFeed {
      activities,
      from_cache: false,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
