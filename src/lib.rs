pub mod activities;
pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod readiness;
pub mod store;
pub mod strava;

#[cfg(test)]
mod test_utils;

pub use activities::{ActivityError, ActivityFeed, ActivityService, ActivitySource};
pub use cache::{is_fresh, CacheGate, Clock, SystemClock, CACHE_TTL_SECONDS};
pub use config::{AppConfig, ConfigError};
pub use models::TrainingLoadSnapshot;
pub use readiness::{classify, Classification, FitnessLevel, ReadinessStatus, ReadinessVerdict};
pub use store::{DocumentStore, MemoryStore, SqliteStore, StoreError};
pub use strava::{StravaActivity, StravaClient, StravaError};
