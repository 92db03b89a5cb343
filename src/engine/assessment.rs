//! Manual assessment form: the user picks damage type and severity themselves
//! instead of running the classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::data::catalog::RiskLevel;
use crate::engine::cost::estimate_cost;
use crate::engine::risk::resolve_risks;
use crate::session::photos::{check_data_uri, PhotoError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentInput {
    #[serde(default)]
    pub damage_type: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// A submitted assessment. Never modified after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub id: Uuid,
    pub damage_type: String,
    pub severity: String,
    pub location: String,
    pub description: String,
    pub photos: Vec<String>,
    pub estimated_cost: u32,
    pub health_risks: Vec<&'static str>,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<&'static str>),
    #[error(transparent)]
    Photo(#[from] PhotoError),
}

pub fn submit_assessment(
    input: AssessmentInput,
    now: DateTime<Utc>,
) -> Result<Assessment, AssessmentError> {
    let missing: Vec<&'static str> = [
        ("damage_type", input.damage_type.as_str()),
        ("severity", input.severity.as_str()),
        ("location", input.location.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Err(AssessmentError::MissingFields(missing));
    }
    for (index, photo) in input.photos.iter().enumerate() {
        check_data_uri(index, photo)?;
    }

    let damage_type = input.damage_type.trim().to_string();
    let severity = input.severity.trim().to_string();
    let summary = resolve_risks(&damage_type);
    let assessment = Assessment {
        id: Uuid::new_v4(),
        estimated_cost: estimate_cost(&damage_type, &severity),
        damage_type,
        severity,
        location: input.location.trim().to_string(),
        description: input.description,
        photos: input.photos,
        health_risks: summary.risks,
        risk_level: summary.level,
        timestamp: now,
    };
    info!(
        id = %assessment.id,
        damage_type = %assessment.damage_type,
        risks = assessment.health_risks.len(),
        "assessment recorded"
    );
    Ok(assessment)
}

/// Submitted assessments for the current process, newest first.
#[derive(Debug, Clone, Default)]
pub struct AssessmentLog {
    entries: Vec<Assessment>,
}

impl AssessmentLog {
    pub fn record(&mut self, assessment: Assessment) {
        self.entries.insert(0, assessment);
    }

    pub fn entries(&self) -> &[Assessment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
