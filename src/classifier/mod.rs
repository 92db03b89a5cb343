//! Photo classification boundary.
//!
//! The estimation engine only ever sees a [Classification]. Where it comes from is
//! behind [DamageClassifier]: the shipped [SimulatedClassifier] draws at random
//! for demos, [FixedClassifier] is the deterministic double used in tests, and a
//! real model can slot in without touching the engine.

pub mod fixed;
pub mod rng;
pub mod simulated;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::catalog::{DamageType, Severity};

pub use fixed::FixedClassifier;
pub use rng::Rng;
pub use simulated::{SimulatedClassifier, SIMULATED_DAMAGE_TYPES};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub damage_type: DamageType,
    pub severity: Severity,
    /// Percentage in `[0, 100]`.
    pub confidence: f64,
}

impl Classification {
    /// One decimal place with a percent sign, e.g. `"92.3%"`.
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("Please upload at least one photo to analyze")]
    NoPhotos,
    #[error("classifier backend failed: {0}")]
    Backend(String),
}

pub trait DamageClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, photos: &[String]) -> Result<Classification, ClassifierError>;
}

/// Classification as persisted under the `analysis` session key.
///
/// Labels are stored as strings so results stay computable even if a stored
/// label later drops out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "type")]
    pub damage_type: String,
    pub severity: String,
    pub confidence: String,
}

impl From<&Classification> for AnalysisRecord {
    fn from(classification: &Classification) -> Self {
        Self {
            damage_type: classification.damage_type.label().to_string(),
            severity: classification.severity.label().to_string(),
            confidence: classification.confidence_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_labels_and_formatted_confidence() {
        let classification = Classification {
            damage_type: DamageType::RoofDamage,
            severity: Severity::Moderate,
            confidence: 87.26,
        };
        let record = AnalysisRecord::from(&classification);
        assert_eq!(record.damage_type, "Roof Damage");
        assert_eq!(record.severity, "Moderate");
        assert_eq!(record.confidence, "87.3%");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Roof Damage");
    }
}
