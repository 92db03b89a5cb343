use serde::Serialize;

use crate::data::catalog::{health_risks, DamageType, HealthRisk, RiskLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub risks: Vec<&'static str>,
    pub level: RiskLevel,
}

/// Catalog risks for a damage label; `[]` when the label is not in the catalog.
pub fn risks_for_label(damage_label: &str) -> &'static [HealthRisk] {
    DamageType::from_label(damage_label)
        .map(health_risks)
        .unwrap_or(&[])
}

/// Max over the entries' levels, `Low` for an empty list. Order-independent.
pub fn aggregate_level(risks: &[HealthRisk]) -> RiskLevel {
    risks
        .iter()
        .fold(RiskLevel::Low, |highest, risk| highest.max(risk.level))
}

pub fn resolve_risks(damage_label: &str) -> RiskSummary {
    let risks = risks_for_label(damage_label);
    RiskSummary {
        risks: risks.iter().map(|risk| risk.risk_type).collect(),
        level: aggregate_level(risks),
    }
}

/// Every recommendation of every risk, in catalog order. Repeats are kept.
pub fn recommendations_for(damage_label: &str) -> Vec<&'static str> {
    flatten_recommendations(risks_for_label(damage_label))
}

pub fn flatten_recommendations(risks: &[HealthRisk]) -> Vec<&'static str> {
    risks
        .iter()
        .flat_map(|risk| risk.recommendations.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(level: RiskLevel) -> HealthRisk {
        HealthRisk {
            risk_type: "test",
            level,
            description: "test",
            recommendations: &["Stay out", "Stay out"],
        }
    }

    #[test]
    fn single_high_dominates_regardless_of_position() {
        let early = [risk(RiskLevel::High), risk(RiskLevel::Low), risk(RiskLevel::Medium)];
        let late = [risk(RiskLevel::Low), risk(RiskLevel::Medium), risk(RiskLevel::High)];
        assert_eq!(aggregate_level(&early), RiskLevel::High);
        assert_eq!(aggregate_level(&late), RiskLevel::High);
    }

    #[test]
    fn empty_list_is_low() {
        assert_eq!(aggregate_level(&[]), RiskLevel::Low);
        let summary = resolve_risks("Not A Damage Type");
        assert!(summary.risks.is_empty());
        assert_eq!(summary.level, RiskLevel::Low);
    }

    #[test]
    fn roof_damage_is_medium() {
        let summary = resolve_risks("Roof Damage");
        assert_eq!(summary.risks, vec!["Water Intrusion"]);
        assert_eq!(summary.level, RiskLevel::Medium);
    }

    #[test]
    fn flattening_keeps_repeats_in_order() {
        let risks = [
            risk(RiskLevel::Low),
            HealthRisk {
                risk_type: "other",
                level: RiskLevel::Medium,
                description: "other",
                recommendations: &["Ventilate"],
            },
            risk(RiskLevel::High),
        ];
        assert_eq!(
            flatten_recommendations(&risks),
            vec!["Stay out", "Stay out", "Ventilate", "Stay out", "Stay out"]
        );
    }

    #[test]
    fn unknown_label_has_no_recommendations() {
        assert!(recommendations_for("Hail").is_empty());
    }
}
