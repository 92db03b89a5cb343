pub mod catalog;
pub mod contractors;
pub mod education;
pub mod profile;
pub mod validate;

pub use catalog::{
    catalog_snapshot, cost_band, health_risks, CatalogSnapshot, CostBand, DamageType, HealthRisk,
    RiskLevel, Severity, CATALOG_VERSION, DEFAULT_COST_BAND,
};
pub use contractors::{contractors_in_tier, Contractor, ContractorTier};
pub use education::{EducationTopic, EmergencyContact, EMERGENCY_CONTACTS, TOPICS};
pub use profile::{validate_profile, Profile, ProfileError};
pub use validate::{validate_catalog, ValidationReport, ValidationSeverity};
