//! Static contractor directory, bucketed by job size.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractorTier {
    Small,
    Medium,
    Large,
}

impl ContractorTier {
    pub const ALL: [ContractorTier; 3] = [Self::Small, Self::Medium, Self::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contractor {
    pub name: &'static str,
    pub phone: &'static str,
    pub specialty: &'static str,
    pub rating: f32,
}

const SMALL_TIER: &[Contractor] = &[
    Contractor {
        name: "Quick Fix Repairs",
        phone: "(555) 123-4567",
        specialty: "Minor repairs",
        rating: 4.5,
    },
    Contractor {
        name: "Local Handyman Co",
        phone: "(555) 234-5678",
        specialty: "Small projects",
        rating: 4.3,
    },
];

const MEDIUM_TIER: &[Contractor] = &[
    Contractor {
        name: "Mid-Range Restoration",
        phone: "(555) 345-6789",
        specialty: "Medium repairs",
        rating: 4.7,
    },
    Contractor {
        name: "Professional Repair Group",
        phone: "(555) 456-7890",
        specialty: "Insurance work",
        rating: 4.6,
    },
];

const LARGE_TIER: &[Contractor] = &[
    Contractor {
        name: "Premium Restoration Co",
        phone: "(555) 567-8901",
        specialty: "Major disasters",
        rating: 4.9,
    },
    Contractor {
        name: "Elite Construction Services",
        phone: "(555) 678-9012",
        specialty: "Full reconstruction",
        rating: 4.8,
    },
];

pub fn contractors_in_tier(tier: ContractorTier) -> &'static [Contractor] {
    match tier {
        ContractorTier::Small => SMALL_TIER,
        ContractorTier::Medium => MEDIUM_TIER,
        ContractorTier::Large => LARGE_TIER,
    }
}
