//! Canonical damage catalog: cost bands and health risks per damage type.
//!
//! The intake form and the results page used to carry their own copies of these
//! tables. This module is the single reconciled copy; bump [CATALOG_VERSION]
//! whenever an entry changes.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const CATALOG_VERSION: &str = "2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DamageType {
    #[serde(rename = "Water Damage")]
    WaterDamage,
    #[serde(rename = "Fire Damage")]
    FireDamage,
    #[serde(rename = "Structural Damage")]
    StructuralDamage,
    #[serde(rename = "Roof Damage")]
    RoofDamage,
    #[serde(rename = "Electrical Damage")]
    ElectricalDamage,
    #[serde(rename = "Flooding", alias = "Flood Damage")]
    Flooding,
    #[serde(rename = "Wind Damage")]
    WindDamage,
    #[serde(rename = "Plumbing Damage")]
    PlumbingDamage,
    #[serde(rename = "Foundation Damage")]
    FoundationDamage,
    #[serde(rename = "Other")]
    Other,
}

impl DamageType {
    pub const ALL: [DamageType; 10] = [
        Self::WaterDamage,
        Self::FireDamage,
        Self::StructuralDamage,
        Self::RoofDamage,
        Self::ElectricalDamage,
        Self::Flooding,
        Self::WindDamage,
        Self::PlumbingDamage,
        Self::FoundationDamage,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::WaterDamage => "Water Damage",
            Self::FireDamage => "Fire Damage",
            Self::StructuralDamage => "Structural Damage",
            Self::RoofDamage => "Roof Damage",
            Self::ElectricalDamage => "Electrical Damage",
            Self::Flooding => "Flooding",
            Self::WindDamage => "Wind Damage",
            Self::PlumbingDamage => "Plumbing Damage",
            Self::FoundationDamage => "Foundation Damage",
            Self::Other => "Other",
        }
    }

    /// Resolve a display label. Whitespace and ASCII case are ignored; the intake
    /// form's "Flood Damage" resolves to [DamageType::Flooding].
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("Flood Damage") {
            return Some(Self::Flooding);
        }
        Self::ALL
            .into_iter()
            .find(|damage| damage.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Self::Minor, Self::Moderate, Self::Severe];

    pub fn label(self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|severity| severity.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Health-hazard level. Ordered `Low < Medium < High`; aggregation takes the max.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBand {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl CostBand {
    /// Band member for a severity. An unrecognized severity prices as `low`.
    pub fn for_severity(&self, severity: Option<Severity>) -> u32 {
        match severity {
            Some(Severity::Minor) | None => self.low,
            Some(Severity::Moderate) => self.medium,
            Some(Severity::Severe) => self.high,
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.low <= self.medium && self.medium <= self.high
    }
}

/// Band used for labels outside the catalog. Same values as [DamageType::Other].
pub const DEFAULT_COST_BAND: CostBand = CostBand {
    low: 1_000,
    medium: 5_000,
    high: 15_000,
};

pub fn cost_band(damage: DamageType) -> CostBand {
    let (low, medium, high) = match damage {
        DamageType::WaterDamage => (2_500, 7_500, 15_000),
        DamageType::FireDamage => (5_000, 25_000, 75_000),
        DamageType::StructuralDamage => (10_000, 35_000, 100_000),
        DamageType::RoofDamage => (3_000, 12_000, 30_000),
        DamageType::ElectricalDamage => (1_500, 8_000, 20_000),
        DamageType::Flooding => (8_000, 25_000, 85_000),
        DamageType::WindDamage => (2_000, 10_000, 25_000),
        DamageType::PlumbingDamage => (1_000, 5_000, 15_000),
        DamageType::FoundationDamage => (8_000, 25_000, 60_000),
        DamageType::Other => return DEFAULT_COST_BAND,
    };
    CostBand { low, medium, high }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthRisk {
    #[serde(rename = "type")]
    pub risk_type: &'static str,
    pub level: RiskLevel,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

const WATER_DAMAGE_RISKS: &[HealthRisk] = &[
    HealthRisk {
        risk_type: "Hidden Mold Growth",
        level: RiskLevel::High,
        description: "Potential mold growth in wall cavities and hidden areas, even if not visible in photos",
        recommendations: &[
            "Immediate water extraction",
            "Professional mold inspection with thermal imaging",
            "Use dehumidifiers",
        ],
    },
    HealthRisk {
        risk_type: "Compromised Water Quality",
        level: RiskLevel::High,
        description: "Water contamination likely affecting drinking water supply",
        recommendations: &[
            "Test water immediately",
            "Use bottled water only",
            "Professional water system inspection",
        ],
    },
    HealthRisk {
        risk_type: "Bacterial Contamination",
        level: RiskLevel::Medium,
        description: "Potential bacterial growth in standing water",
        recommendations: &[
            "Avoid direct contact",
            "Use protective equipment",
            "Professional testing",
        ],
    },
];

const FLOODING_RISKS: &[HealthRisk] = &[
    HealthRisk {
        risk_type: "Contaminated Floodwater",
        level: RiskLevel::High,
        description: "Floodwater contains dangerous bacteria, chemicals, and sewage that pose immediate health risks",
        recommendations: &[
            "Evacuate if water is rising",
            "Never walk through moving water",
            "Avoid all contact with floodwater",
            "Seek tetanus shot if exposed",
        ],
    },
    HealthRisk {
        risk_type: "Hidden Structural Damage",
        level: RiskLevel::High,
        description: "Flooding can weaken foundations and structural supports not visible from surface inspection",
        recommendations: &[
            "Professional structural assessment",
            "Avoid entering flooded buildings",
            "Check foundation integrity",
        ],
    },
    HealthRisk {
        risk_type: "Electrical Hazards",
        level: RiskLevel::High,
        description: "Standing water combined with electrical systems creates electrocution risk",
        recommendations: &[
            "Turn off power at main breaker if safe to do so",
            "Never enter flooded areas with electricity on",
            "Professional electrical inspection required",
        ],
    },
    HealthRisk {
        risk_type: "Mold and Air Quality",
        level: RiskLevel::High,
        description: "Rapid mold growth occurs within 24-48 hours after flooding, even in hidden areas",
        recommendations: &[
            "Document all damage immediately",
            "Begin water removal within 24 hours",
            "Professional mold remediation",
            "Use N95 masks",
        ],
    },
];

const FIRE_DAMAGE_RISKS: &[HealthRisk] = &[
    HealthRisk {
        risk_type: "Smoke Inhalation",
        level: RiskLevel::High,
        description: "Dangerous smoke particles and chemical residue",
        recommendations: &[
            "Ventilate immediately",
            "Wear N95 masks",
            "Air quality testing",
        ],
    },
    HealthRisk {
        risk_type: "Toxic Chemicals",
        level: RiskLevel::High,
        description: "Burned materials may release harmful compounds",
        recommendations: &[
            "Professional hazmat assessment",
            "Evacuate if necessary",
            "Use proper PPE",
        ],
    },
];

const STRUCTURAL_DAMAGE_RISKS: &[HealthRisk] = &[HealthRisk {
    risk_type: "Collapse Risk",
    level: RiskLevel::High,
    description: "Immediate physical danger from structural instability",
    recommendations: &[
        "Evacuate immediately",
        "Professional inspection",
        "Secure perimeter",
    ],
}];

const ROOF_DAMAGE_RISKS: &[HealthRisk] = &[HealthRisk {
    risk_type: "Water Intrusion",
    level: RiskLevel::Medium,
    description: "Ongoing water damage risk",
    recommendations: &[
        "Temporary weatherproofing",
        "Monitor for leaks",
        "Professional repair",
    ],
}];

const ELECTRICAL_DAMAGE_RISKS: &[HealthRisk] = &[HealthRisk {
    risk_type: "Electrocution Risk",
    level: RiskLevel::High,
    description: "Exposed electrical systems pose immediate danger",
    recommendations: &[
        "Turn off main power",
        "Professional electrical inspection",
        "Avoid water contact",
    ],
}];

/// Catalog-ordered risks for a damage type. Types without known hazards return `[]`.
pub fn health_risks(damage: DamageType) -> &'static [HealthRisk] {
    match damage {
        DamageType::WaterDamage => WATER_DAMAGE_RISKS,
        DamageType::Flooding => FLOODING_RISKS,
        DamageType::FireDamage => FIRE_DAMAGE_RISKS,
        DamageType::StructuralDamage => STRUCTURAL_DAMAGE_RISKS,
        DamageType::RoofDamage => ROOF_DAMAGE_RISKS,
        DamageType::ElectricalDamage => ELECTRICAL_DAMAGE_RISKS,
        DamageType::WindDamage
        | DamageType::PlumbingDamage
        | DamageType::FoundationDamage
        | DamageType::Other => &[],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub damage_type: DamageType,
    pub cost_band: CostBand,
    pub health_risks: &'static [HealthRisk],
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub version: &'static str,
    pub severities: Vec<Severity>,
    pub default_cost_band: CostBand,
    pub entries: Vec<CatalogEntry>,
}

pub fn catalog_snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        version: CATALOG_VERSION,
        severities: Severity::ALL.to_vec(),
        default_cost_band: DEFAULT_COST_BAND,
        entries: DamageType::ALL
            .into_iter()
            .map(|damage_type| CatalogEntry {
                damage_type,
                cost_band: cost_band(damage_type),
                health_risks: health_risks(damage_type),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_with_flood_alias() {
        for damage in DamageType::ALL {
            assert_eq!(DamageType::from_label(damage.label()), Some(damage));
        }
        assert_eq!(DamageType::from_label("  flood damage "), Some(DamageType::Flooding));
        assert_eq!(DamageType::from_label("Hail Damage"), None);
    }

    #[test]
    fn severity_and_risk_level_are_ordered() {
        assert!(Severity::Minor < Severity::Moderate && Severity::Moderate < Severity::Severe);
        assert!(RiskLevel::Low < RiskLevel::Medium && RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::default(), RiskLevel::Low);
    }

    #[test]
    fn other_band_is_the_default_band() {
        assert_eq!(cost_band(DamageType::Other), DEFAULT_COST_BAND);
    }

    #[test]
    fn damage_type_serializes_as_label() {
        let json = serde_json::to_string(&DamageType::WaterDamage).unwrap();
        assert_eq!(json, "\"Water Damage\"");
        let parsed: DamageType = serde_json::from_str("\"Flood Damage\"").unwrap();
        assert_eq!(parsed, DamageType::Flooding);
    }
}
