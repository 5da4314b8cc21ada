use crate::models::TrainingLoadSnapshot;
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Readiness Status (from TSB)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
  Fresh,
  Optimal,
  Productive,
  Overreaching,
  Overtraining,
}

/// Status thresholds, checked top to bottom with a strict `tsb > threshold`.
/// Anything at or below the last threshold is Overtraining.
const STATUS_THRESHOLDS: [(f64, ReadinessStatus); 4] = [
  (25.0, ReadinessStatus::Fresh),
  (5.0, ReadinessStatus::Optimal),
  (-10.0, ReadinessStatus::Productive),
  (-30.0, ReadinessStatus::Overreaching),
];

impl ReadinessStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReadinessStatus::Fresh => "fresh",
      ReadinessStatus::Optimal => "optimal",
      ReadinessStatus::Productive => "productive",
      ReadinessStatus::Overreaching => "overreaching",
      ReadinessStatus::Overtraining => "overtraining",
    }
  }

  pub fn narrative(&self) -> &'static str {
    match self {
      ReadinessStatus::Fresh => "well rested, good time for hard efforts",
      ReadinessStatus::Optimal => "perfect balance, maintain training",
      ReadinessStatus::Productive => "slight fatigue, building fitness",
      ReadinessStatus::Overreaching => "significant fatigue, consider recovery",
      ReadinessStatus::Overtraining => "high fatigue, recovery needed",
    }
  }
}

pub fn status_for_tsb(tsb: f64) -> ReadinessStatus {
  STATUS_THRESHOLDS
    .iter()
    .find(|(threshold, _)| tsb > *threshold)
    .map(|(_, status)| *status)
    .unwrap_or(ReadinessStatus::Overtraining)
}

/// ---------------------------------------------------------------------------
/// Nutrition Guidance (from TSB, independent thresholds)
/// ---------------------------------------------------------------------------

pub const GUIDANCE_RECOVERY_FUEL: &str = "increase calories and carbs for recovery";
pub const GUIDANCE_MAINTAIN: &str = "maintain current nutrition";
pub const GUIDANCE_STICK_WITH_PLAN: &str = "stick with your plan";
pub const GUIDANCE_FUEL_UP: &str = "fuel up for hard training ahead";

/// Lower bounds (inclusive), checked top to bottom with `tsb >= bound`.
/// These do not line up with the status thresholds: guidance flips at 0
/// while status flips at 5.
const NUTRITION_BOUNDS: [(f64, &str); 3] = [
  (15.0, GUIDANCE_FUEL_UP),
  (0.0, GUIDANCE_STICK_WITH_PLAN),
  (-20.0, GUIDANCE_MAINTAIN),
];

pub fn nutrition_guidance_for_tsb(tsb: f64) -> &'static str {
  NUTRITION_BOUNDS
    .iter()
    .find(|(bound, _)| tsb >= *bound)
    .map(|(_, guidance)| *guidance)
    .unwrap_or(GUIDANCE_RECOVERY_FUEL)
}

/// ---------------------------------------------------------------------------
/// Fitness Level (from CTL)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
  Beginner,
  Developing,
  Intermediate,
  Advanced,
  Elite,
}

const FITNESS_THRESHOLDS: [(f64, FitnessLevel); 4] = [
  (100.0, FitnessLevel::Elite),
  (80.0, FitnessLevel::Advanced),
  (60.0, FitnessLevel::Intermediate),
  (40.0, FitnessLevel::Developing),
];

impl FitnessLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      FitnessLevel::Beginner => "beginner",
      FitnessLevel::Developing => "developing",
      FitnessLevel::Intermediate => "intermediate",
      FitnessLevel::Advanced => "advanced",
      FitnessLevel::Elite => "elite",
    }
  }
}

pub fn fitness_level_for_ctl(ctl: f64) -> FitnessLevel {
  FITNESS_THRESHOLDS
    .iter()
    .find(|(threshold, _)| ctl > *threshold)
    .map(|(_, level)| *level)
    .unwrap_or(FitnessLevel::Beginner)
}

/// ---------------------------------------------------------------------------
/// Classification
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessVerdict {
  pub status: ReadinessStatus,
  pub narrative: String,
  pub nutrition_guidance: String,
  pub fitness_level: FitnessLevel,
}

/// Result handed to the presentation layer.
///
/// `NoData` means the metrics provider reported nothing yet and should be
/// rendered as "not connected", not as a readiness state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Classification {
  NoData,
  Classified(ReadinessVerdict),
}

impl Classification {
  pub fn verdict(&self) -> Option<&ReadinessVerdict> {
    match self {
      Classification::NoData => None,
      Classification::Classified(verdict) => Some(verdict),
    }
  }
}

/// Classify a training-load snapshot.
///
/// An all-zero snapshot is indistinguishable from a disconnected provider
/// and always yields `NoData`.
pub fn classify(snapshot: &TrainingLoadSnapshot) -> Classification {
  if snapshot.is_empty() {
    return Classification::NoData;
  }

  let status = status_for_tsb(snapshot.tsb);

  Classification::Classified(ReadinessVerdict {
    status,
    narrative: status.narrative().to_string(),
    nutrition_guidance: nutrition_guidance_for_tsb(snapshot.tsb).to_string(),
    fitness_level: fitness_level_for_ctl(snapshot.ctl),
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
