//! Budget match heuristic: compare an estimate with the ceiling the user typed.

use std::fmt;

use serde::Serialize;

use crate::data::profile::Profile;

/// Estimates at or below `budget * WITHIN_BUDGET_RATIO` are comfortably affordable.
pub const WITHIN_BUDGET_RATIO: f64 = 0.8;
/// Estimates at or below `budget * CLOSE_TO_BUDGET_RATIO` are a stretch but reachable.
pub const CLOSE_TO_BUDGET_RATIO: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BudgetMatch {
    #[serde(rename = "Within Budget")]
    WithinBudget,
    #[serde(rename = "Close to Budget")]
    CloseToBudget,
    #[serde(rename = "Over Budget")]
    OverBudget,
    Unknown,
}

impl BudgetMatch {
    pub fn label(self) -> &'static str {
        match self {
            Self::WithinBudget => "Within Budget",
            Self::CloseToBudget => "Close to Budget",
            Self::OverBudget => "Over Budget",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BudgetMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strip every non-digit and read what is left as the ceiling. A range such as
/// "$10,000 - $50,000" collapses to one number; no digits (or too many) is `None`.
pub fn parse_budget_ceiling(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

pub fn match_budget(estimated_cost: u32, budget: &str) -> BudgetMatch {
    let Some(ceiling) = parse_budget_ceiling(budget) else {
        return BudgetMatch::Unknown;
    };
    let cost = f64::from(estimated_cost);
    let ceiling = ceiling as f64;
    if cost <= ceiling * WITHIN_BUDGET_RATIO {
        BudgetMatch::WithinBudget
    } else if cost <= ceiling * CLOSE_TO_BUDGET_RATIO {
        BudgetMatch::CloseToBudget
    } else {
        BudgetMatch::OverBudget
    }
}

pub fn match_profile_budget(estimated_cost: u32, profile: Option<&Profile>) -> BudgetMatch {
    match profile {
        Some(profile) => match_budget(estimated_cost, &profile.budget),
        None => BudgetMatch::Unknown,
    }
}
