use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const STRAVA_API_BASE: &str = "https://www.strava.com/api/v3";
pub const DEFAULT_PER_PAGE: u32 = 50;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StravaError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Invalid API URL: {0}")]
  Url(#[from] url::ParseError),

  #[error("Strava API error ({status}): {body}")]
  Api { status: u16, body: String },

  #[error("Failed to parse Strava response: {0}")]
  Parse(String),

  #[error("Not authenticated with Strava")]
  NotAuthenticated,
}

impl Serialize for StravaError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Strava API - Activity Fetching
/// ---------------------------------------------------------------------------

/// Activity summary from Strava API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StravaActivity {
  pub id: i64,
  pub name: String,
  /// Strava uses "type" for legacy and "sport_type" for newer activities
  #[serde(rename = "type", default)]
  pub activity_type: String,
  pub start_date: DateTime<Utc>,
  #[serde(default)]
  pub elapsed_time: i64,
  #[serde(default)]
  pub moving_time: i64,
  #[serde(default)]
  pub distance: Option<f64>,
  #[serde(default)]
  pub total_elevation_gain: Option<f64>,
  #[serde(default)]
  pub average_heartrate: Option<f64>,
  #[serde(default)]
  pub max_heartrate: Option<f64>,
  #[serde(default)]
  pub average_watts: Option<f64>,
  #[serde(default)]
  pub suffer_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct StravaClient {
  http: Client,
  api_base: String,
  per_page: u32,
}

impl Default for StravaClient {
  fn default() -> Self {
    Self::new(STRAVA_API_BASE, DEFAULT_PER_PAGE)
  }
}

impl StravaClient {
  pub fn new(api_base: impl Into<String>, per_page: u32) -> Self {
    Self {
      http: Client::new(),
      api_base: api_base.into().trim_end_matches('/').to_string(),
      per_page,
    }
  }

  fn activities_url(&self) -> Result<Url, StravaError> {
    let mut url = Url::parse(&format!("{}/athlete/activities", self.api_base))?;
    url
      .query_pairs_mut()
      .append_pair("per_page", &self.per_page.to_string());
    Ok(url)
  }

  /// Fetch the athlete's most recent activities
  pub async fn fetch_activities(&self, access_token: &str) -> Result<Vec<StravaActivity>, StravaError> {
    let url = self.activities_url()?;

    let response = self
      .http
      .get(url)
      .header("Authorization", format!("Bearer {}", access_token))
      .send()
      .await?;

    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
      return Err(StravaError::NotAuthenticated);
    }

    if !response.status().is_success() {
      let status = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      return Err(StravaError::Api { status, body });
    }

    // Get raw text first so parse failures can be logged with context
    let response_text = response.text().await?;

    let activities: Vec<StravaActivity> = serde_json::from_str(&response_text).map_err(|e| {
      let snippet: String = response_text.chars().take(1000).collect();
      tracing::error!(error = %e, body = %snippet, "Failed to parse Strava activities");
      StravaError::Parse(e.to_string())
    })?;

    tracing::info!(count = activities.len(), "Fetched activities from Strava");

    Ok(activities)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
