use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::data::catalog::{cost_band, health_risks, DamageType, Severity, DEFAULT_COST_BAND};
use crate::data::contractors::{contractors_in_tier, ContractorTier};
use crate::data::education::TOPICS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Sanity-check the built-in tables. The tables are compiled in, so an error here
/// means someone edited the catalog badly.
pub fn validate_catalog() -> ValidationReport {
    let mut report = ValidationReport::default();

    if !DEFAULT_COST_BAND.is_monotonic() {
        report.push(
            ValidationSeverity::Error,
            "default_cost_band",
            "expected low <= medium <= high",
        );
    }

    for damage in DamageType::ALL {
        let context = format!("damage_type '{damage}'");
        validate_damage_entry(&mut report, damage, &context);
    }

    for severity in Severity::ALL {
        if Severity::from_label(severity.label()) != Some(severity) {
            report.push(
                ValidationSeverity::Error,
                format!("severity '{severity}'"),
                "label does not resolve back to itself",
            );
        }
    }

    validate_contractors(&mut report);
    validate_topics(&mut report);
    report
}

fn validate_damage_entry(report: &mut ValidationReport, damage: DamageType, context: &str) {
    if DamageType::from_label(damage.label()) != Some(damage) {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.label"),
            "label does not resolve back to itself",
        );
    }

    let band = cost_band(damage);
    if !band.is_monotonic() {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.cost_band"),
            format!(
                "expected low <= medium <= high, got {}/{}/{}",
                band.low, band.medium, band.high
            ),
        );
    }

    let risks = health_risks(damage);
    if risks.is_empty() {
        report.push(
            ValidationSeverity::Info,
            format!("{context}.health_risks"),
            "no health risks catalogued; risk level defaults to low",
        );
    }

    let mut seen_recommendations = HashSet::new();
    for (index, risk) in risks.iter().enumerate() {
        let risk_context = format!("{context}.health_risks[{index}]");
        if risk.risk_type.trim().is_empty() {
            report.push(
                ValidationSeverity::Error,
                format!("{risk_context}.type"),
                "missing non-empty 'type'",
            );
        }
        if risk.description.trim().is_empty() {
            report.push(
                ValidationSeverity::Error,
                format!("{risk_context}.description"),
                "missing non-empty 'description'",
            );
        }
        if risk.recommendations.is_empty() {
            report.push(
                ValidationSeverity::Error,
                format!("{risk_context}.recommendations"),
                "expected at least one recommendation",
            );
        }
        for recommendation in risk.recommendations {
            if !seen_recommendations.insert(*recommendation) {
                report.push(
                    ValidationSeverity::Info,
                    format!("{risk_context}.recommendations"),
                    format!("'{recommendation}' repeats an earlier recommendation"),
                );
            }
        }
    }
}

fn validate_contractors(report: &mut ValidationReport) {
    for tier in ContractorTier::ALL {
        let context = format!("contractors.{}", tier.as_str());
        let contractors = contractors_in_tier(tier);
        if contractors.is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "tier has no contractors");
        }
        for (index, contractor) in contractors.iter().enumerate() {
            if !(0.0..=5.0).contains(&contractor.rating) {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}[{index}].rating"),
                    format!("rating {} outside [0, 5]", contractor.rating),
                );
            }
            if contractor.phone.trim().is_empty() {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}[{index}].phone"),
                    "missing phone number",
                );
            }
        }
    }
}

fn validate_topics(report: &mut ValidationReport) {
    let mut seen_ids = HashSet::new();
    for (index, topic) in TOPICS.iter().enumerate() {
        let context = format!("education[{index}]");
        if !seen_ids.insert(topic.id) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.id"),
                format!("duplicate id '{}'", topic.id),
            );
        }
        let sections = [
            ("risks", topic.risks),
            ("prevention", topic.prevention),
            ("signs", topic.signs),
            ("actions", topic.actions),
        ];
        for (name, items) in sections {
            if items.is_empty() {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.{name}"),
                    "section is empty",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_catalog_has_no_errors() {
        let report = validate_catalog();
        let errors: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
            .collect();
        assert!(errors.is_empty(), "unexpected catalog errors: {errors:?}");
    }

    #[test]
    fn types_without_risks_are_reported_as_info() {
        let report = validate_catalog();
        assert!(report.diagnostics.iter().any(|diag| {
            diag.severity == ValidationSeverity::Info
                && diag.context == "damage_type 'Wind Damage'.health_risks"
        }));
    }
}
