use std::sync::{Mutex, PoisonError};

use crate::classifier::rng::Rng;
use crate::classifier::{Classification, ClassifierError, DamageClassifier};
use crate::data::catalog::{DamageType, Severity};

/// Damage types the simulated classifier picks from.
pub const SIMULATED_DAMAGE_TYPES: [DamageType; 5] = [
    DamageType::WaterDamage,
    DamageType::FireDamage,
    DamageType::StructuralDamage,
    DamageType::RoofDamage,
    DamageType::ElectricalDamage,
];

const MIN_CONFIDENCE: f64 = 85.0;
const CONFIDENCE_SPREAD: f64 = 15.0;

/// Stand-in for a real model: ignores the photos' content and draws a uniform
/// damage type, severity and a confidence in `[85, 100)`.
#[derive(Debug)]
pub struct SimulatedClassifier {
    rng: Mutex<Rng>,
}

impl SimulatedClassifier {
    pub fn new(rng: Rng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Rng::new(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(Rng::from_entropy())
    }
}

impl DamageClassifier for SimulatedClassifier {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn classify(&self, photos: &[String]) -> Result<Classification, ClassifierError> {
        if photos.is_empty() {
            return Err(ClassifierError::NoPhotos);
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let damage_type = SIMULATED_DAMAGE_TYPES[rng.next_index(SIMULATED_DAMAGE_TYPES.len())];
        let severity = Severity::ALL[rng.next_index(Severity::ALL.len())];
        let confidence = MIN_CONFIDENCE + rng.next_f64() * CONFIDENCE_SPREAD;
        Ok(Classification {
            damage_type,
            severity,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos() -> Vec<String> {
        vec!["data:image/jpeg;base64,/9j/4AAQ".to_string()]
    }

    #[test]
    fn same_seed_same_classifications() {
        let a = SimulatedClassifier::seeded(11);
        let b = SimulatedClassifier::seeded(11);
        for _ in 0..20 {
            assert_eq!(a.classify(&photos()), b.classify(&photos()));
        }
    }

    #[test]
    fn draws_stay_inside_the_simulated_catalog() {
        let classifier = SimulatedClassifier::seeded(3);
        for _ in 0..500 {
            let result = classifier.classify(&photos()).unwrap();
            assert!(SIMULATED_DAMAGE_TYPES.contains(&result.damage_type));
            assert!((85.0..100.0).contains(&result.confidence));
        }
    }

    #[test]
    fn empty_photo_set_is_rejected() {
        let classifier = SimulatedClassifier::seeded(1);
        assert_eq!(classifier.classify(&[]), Err(ClassifierError::NoPhotos));
    }
}
