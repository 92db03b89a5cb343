use crate::data::catalog::{cost_band, CostBand, DamageType, Severity, DEFAULT_COST_BAND};

/// Band for a damage label; labels outside the catalog use [DEFAULT_COST_BAND].
pub fn cost_band_for_label(damage_label: &str) -> CostBand {
    DamageType::from_label(damage_label)
        .map(cost_band)
        .unwrap_or(DEFAULT_COST_BAND)
}

/// Repair estimate for a damage/severity pair. Total over every label: unknown
/// damage types price from the default band, unknown severities price as Minor.
pub fn estimate_cost(damage_label: &str, severity_label: &str) -> u32 {
    cost_band_for_label(damage_label).for_severity(Severity::from_label(severity_label))
}

pub fn estimate_cost_for(damage: DamageType, severity: Severity) -> u32 {
    cost_band(damage).for_severity(Some(severity))
}
