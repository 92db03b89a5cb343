use crate::data::contractors::{contractors_in_tier, Contractor, ContractorTier};

/// Jobs below this go to the small tier.
pub const SMALL_TIER_CEILING: u32 = 5_000;
/// Jobs below this (and at or above [SMALL_TIER_CEILING]) go to the medium tier.
pub const MEDIUM_TIER_CEILING: u32 = 25_000;

pub fn contractor_tier(estimated_cost: u32) -> ContractorTier {
    if estimated_cost < SMALL_TIER_CEILING {
        ContractorTier::Small
    } else if estimated_cost < MEDIUM_TIER_CEILING {
        ContractorTier::Medium
    } else {
        ContractorTier::Large
    }
}

pub fn select_contractors(estimated_cost: u32) -> &'static [Contractor] {
    contractors_in_tier(contractor_tier(estimated_cost))
}
