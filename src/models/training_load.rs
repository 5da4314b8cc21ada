use serde::{Deserialize, Deserializer, Serialize};

/// Training-load metrics as reported by the metrics provider.
///
/// Missing or `null` fields deserialize to `0.0`, matching the provider's
/// behaviour before an athlete has connected any data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoadSnapshot {
  /// Chronic training load ("fitness")
  #[serde(default, deserialize_with = "null_as_zero")]
  pub ctl: f64,
  /// Acute training load ("fatigue")
  #[serde(default, deserialize_with = "null_as_zero")]
  pub atl: f64,
  /// Training stress balance ("form"), supplied independently of ctl/atl
  #[serde(default, deserialize_with = "null_as_zero")]
  pub tsb: f64,
}

impl TrainingLoadSnapshot {
  pub fn new(ctl: f64, atl: f64, tsb: f64) -> Self {
    Self { ctl, atl, tsb }
  }

  /// Build a snapshot from optional provider fields, coercing `None` to zero.
  pub fn from_optional(ctl: Option<f64>, atl: Option<f64>, tsb: Option<f64>) -> Self {
    Self {
      ctl: ctl.unwrap_or_default(),
      atl: atl.unwrap_or_default(),
      tsb: tsb.unwrap_or_default(),
    }
  }

  /// All three readings are zero: treated as "metrics not connected".
  pub fn is_empty(&self) -> bool {
    self.ctl == 0.0 && self.atl == 0.0 && self.tsb == 0.0
  }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
