use crate::strava::{DEFAULT_PER_PAGE, STRAVA_API_BASE};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://training-readiness.db?mode=rwc";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  Missing(String),

  #[error("Invalid value for {name}: {value}")]
  Invalid { name: String, value: String },
}

/// Runtime configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub database_url: String,
  pub strava_api_base: String,
  pub strava_per_page: u32,
  pub strava_access_token: Option<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let strava_per_page = match env::var("STRAVA_PER_PAGE") {
      Ok(value) => value
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(ConfigError::Invalid {
          name: "STRAVA_PER_PAGE".into(),
          value,
        })?,
      Err(_) => DEFAULT_PER_PAGE,
    };

    Ok(Self {
      database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
      strava_api_base: env::var("STRAVA_API_BASE").unwrap_or_else(|_| STRAVA_API_BASE.into()),
      strava_per_page,
      strava_access_token: env::var("STRAVA_ACCESS_TOKEN").ok().filter(|t| !t.is_empty()),
    })
  }

  /// Explicit token wins over the environment
  pub fn access_token(&self, explicit: Option<String>) -> Result<String, ConfigError> {
    explicit
      .or_else(|| self.strava_access_token.clone())
      .ok_or_else(|| ConfigError::Missing("STRAVA_ACCESS_TOKEN".into()))
  }
}
