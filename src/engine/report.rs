//! Composes the individual rules into the payloads the results screen and the
//! stateless estimate endpoint return.

use serde::Serialize;

use crate::classifier::AnalysisRecord;
use crate::data::catalog::{HealthRisk, RiskLevel};
use crate::data::contractors::{Contractor, ContractorTier};
use crate::data::education::{EmergencyContact, EMERGENCY_CONTACTS};
use crate::data::profile::Profile;
use crate::engine::budget::{match_budget, match_profile_budget, BudgetMatch};
use crate::engine::contractors::{contractor_tier, select_contractors};
use crate::engine::cost::estimate_cost;
use crate::engine::risk::{aggregate_level, recommendations_for, risks_for_label};

#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub damage_type: String,
    pub severity: String,
    pub estimated_cost: u32,
    pub risk_level: RiskLevel,
    pub health_risks: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
    pub budget_match: BudgetMatch,
    pub contractor_tier: ContractorTier,
    pub contractors: &'static [Contractor],
}

pub fn estimate(damage_label: &str, severity_label: &str, budget: Option<&str>) -> Estimate {
    let estimated_cost = estimate_cost(damage_label, severity_label);
    let risks = risks_for_label(damage_label);
    Estimate {
        damage_type: damage_label.to_string(),
        severity: severity_label.to_string(),
        estimated_cost,
        risk_level: aggregate_level(risks),
        health_risks: risks.iter().map(|risk| risk.risk_type).collect(),
        recommendations: recommendations_for(damage_label),
        budget_match: budget.map_or(BudgetMatch::Unknown, |raw| match_budget(estimated_cost, raw)),
        contractor_tier: contractor_tier(estimated_cost),
        contractors: select_contractors(estimated_cost),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub damage_type: String,
    pub severity: String,
    pub confidence: String,
    pub photo_count: usize,
    pub estimated_cost: u32,
    pub risk_level: RiskLevel,
    pub health_risks: &'static [HealthRisk],
    pub recommendations: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub budget_match: BudgetMatch,
    pub contractor_tier: ContractorTier,
    pub contractors: &'static [Contractor],
    pub emergency_contacts: &'static [EmergencyContact],
}

pub fn build_results(
    profile: Option<&Profile>,
    photo_count: usize,
    analysis: &AnalysisRecord,
) -> ResultsReport {
    let estimated_cost = estimate_cost(&analysis.damage_type, &analysis.severity);
    let health_risks = risks_for_label(&analysis.damage_type);
    ResultsReport {
        address: profile.map(|p| p.address.clone()),
        damage_type: analysis.damage_type.clone(),
        severity: analysis.severity.clone(),
        confidence: analysis.confidence.clone(),
        photo_count,
        estimated_cost,
        risk_level: aggregate_level(health_risks),
        health_risks,
        recommendations: recommendations_for(&analysis.damage_type),
        budget: profile.map(|p| p.budget.clone()),
        budget_match: match_profile_budget(estimated_cost, profile),
        contractor_tier: contractor_tier(estimated_cost),
        contractors: select_contractors(estimated_cost),
        emergency_contacts: EMERGENCY_CONTACTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(damage_type: &str, severity: &str) -> AnalysisRecord {
        AnalysisRecord {
            damage_type: damage_type.to_string(),
            severity: severity.to_string(),
            confidence: "91.4%".to_string(),
        }
    }

    #[test]
    fn results_without_profile_have_unknown_budget() {
        let report = build_results(None, 2, &analysis("Roof Damage", "Moderate"));
        assert_eq!(report.estimated_cost, 12_000);
        assert_eq!(report.budget_match, BudgetMatch::Unknown);
        assert_eq!(report.contractor_tier, ContractorTier::Medium);
        assert!(report.address.is_none());
        assert_eq!(report.photo_count, 2);
    }

    #[test]
    fn results_with_profile_match_budget() {
        let profile = Profile {
            name: "Sam".to_string(),
            address: "4 Elm St".to_string(),
            budget: "$20,000".to_string(),
            consent: true,
        };
        let report = build_results(Some(&profile), 1, &analysis("Electrical Damage", "Severe"));
        assert_eq!(report.estimated_cost, 20_000);
        assert_eq!(report.budget_match, BudgetMatch::CloseToBudget);
        assert_eq!(report.address.as_deref(), Some("4 Elm St"));
        assert_eq!(report.risk_level, RiskLevel::High);
    }

    #[test]
    fn estimate_without_budget_is_unknown() {
        let est = estimate("Plumbing Damage", "Minor", None);
        assert_eq!(est.estimated_cost, 1_000);
        assert_eq!(est.budget_match, BudgetMatch::Unknown);
        assert_eq!(est.risk_level, RiskLevel::Low);
        assert_eq!(est.contractor_tier, ContractorTier::Small);
    }
}
