//! Deterministic rules that turn a damage type and severity into a cost, a
//! health-risk picture, a budget verdict, and a contractor shortlist.

pub mod assessment;
pub mod budget;
pub mod contractors;
pub mod cost;
pub mod report;
pub mod risk;

pub use assessment::{submit_assessment, Assessment, AssessmentError, AssessmentInput, AssessmentLog};
pub use budget::{
    match_budget, match_profile_budget, parse_budget_ceiling, BudgetMatch, CLOSE_TO_BUDGET_RATIO,
    WITHIN_BUDGET_RATIO,
};
pub use contractors::{contractor_tier, select_contractors, MEDIUM_TIER_CEILING, SMALL_TIER_CEILING};
pub use cost::{cost_band_for_label, estimate_cost, estimate_cost_for};
pub use report::{build_results, estimate, Estimate, ResultsReport};
pub use risk::{
    aggregate_level, flatten_recommendations, recommendations_for, resolve_risks, risks_for_label,
    RiskSummary,
};
