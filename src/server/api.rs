use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::classifier::AnalysisRecord;
use crate::data::catalog::catalog_snapshot;
use crate::data::education::{topic, EMERGENCY_CONTACTS, FEDERAL_ASSISTANCE_URL, TOPICS};
use crate::data::profile::Profile;
use crate::engine::assessment::{submit_assessment, Assessment, AssessmentError, AssessmentInput};
use crate::engine::report::estimate;
use crate::server::AppState;
use crate::session::analysis::analyze_session;
use crate::session::flow::FlowError;
use crate::session::photos::PhotoUpload;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationErrorResponse {
    fn for_fields(fields: &[&'static str], message: &str) -> Self {
        Self {
            status: "error",
            message: "Validation failed",
            errors: fields
                .iter()
                .map(|&field| ValidationIssue {
                    field,
                    messages: vec![message.to_string()],
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Parse(serde_json::Error),
    Validation(ValidationErrorResponse),
    Flow(FlowError),
    NotFound(&'static str),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Invalid request body: {err}"),
            Self::Validation(_) => write!(f, "Validation failed"),
            Self::Flow(err) => write!(f, "{err}"),
            Self::NotFound(what) => write!(f, "{what} not found"),
            Self::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Profile(profile_err) => {
                let message = profile_err.to_string();
                Self::Validation(ValidationErrorResponse::for_fields(
                    &profile_err.fields(),
                    &message,
                ))
            }
            other => Self::Flow(other),
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        let message = err.to_string();
        match err {
            AssessmentError::MissingFields(fields) => {
                Self::Validation(ValidationErrorResponse::for_fields(&fields, &message))
            }
            AssessmentError::Photo(_) => {
                Self::Validation(ValidationErrorResponse::for_fields(&["photos"], &message))
            }
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(ApiError::Parse)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| ApiError::Internal(format!("failed to serialize response: {err}")))
}

pub fn health_payload(state: &AppState) -> Result<String, ApiError> {
    to_json(&serde_json::json!({
        "status": "ok",
        "service": "damage-aid-api",
        "version": env!("CARGO_PKG_VERSION"),
        "classifier": state.classifier.name(),
    }))
}

pub fn catalog_payload() -> Result<String, ApiError> {
    to_json(&catalog_snapshot())
}

pub fn session_payload(state: &AppState) -> Result<String, ApiError> {
    let snapshot = state.wizard().snapshot()?;
    to_json(&snapshot)
}

pub fn session_reset_payload(state: &AppState) -> Result<String, ApiError> {
    state.wizard().reset()?;
    to_json(&serde_json::json!({ "status": "ok", "stage": "empty" }))
}

pub fn profile_get_payload(state: &AppState) -> Result<String, ApiError> {
    let profile = state.wizard().profile()?.ok_or(ApiError::NotFound("Profile"))?;
    to_json(&profile)
}

pub fn profile_put_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let profile: Profile = parse_body(body)?;
    let mut wizard = state.wizard();
    let saved = wizard.create_profile(profile)?;
    to_json(&serde_json::json!({
        "status": "ok",
        "message": "Your profile has been saved successfully",
        "stage": wizard.stage(),
        "profile": saved,
    }))
}

#[derive(Debug, Deserialize)]
struct PhotosRequest {
    photos: Vec<PhotoUpload>,
}

pub fn photos_put_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let request: PhotosRequest = parse_body(body)?;
    let mut wizard = state.wizard();
    let count = wizard.upload_photos(request.photos)?;
    to_json(&serde_json::json!({
        "status": "ok",
        "photo_count": count,
        "stage": wizard.stage(),
    }))
}

pub fn photo_delete_payload(state: &AppState, raw_index: &str) -> Result<String, ApiError> {
    let index: usize = raw_index.parse().map_err(|_| ApiError::NotFound("Photo"))?;
    let mut wizard = state.wizard();
    let count = wizard.remove_photo(index)?;
    to_json(&serde_json::json!({
        "status": "ok",
        "photo_count": count,
        "stage": wizard.stage(),
    }))
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    status: &'static str,
    message: String,
    analysis: AnalysisRecord,
}

pub async fn analysis_post_payload(state: &AppState) -> Result<String, ApiError> {
    let record =
        analyze_session(&state.wizard, state.classifier.as_ref(), state.analysis_delay).await?;
    to_json(&AnalysisResponse {
        status: "ok",
        message: format!(
            "Detected {} with {} confidence",
            record.damage_type, record.confidence
        ),
        analysis: record,
    })
}

pub fn results_payload(state: &AppState) -> Result<String, ApiError> {
    let report = state.wizard().results()?;
    to_json(&report)
}

#[derive(Debug, Deserialize)]
struct EstimateRequest {
    #[serde(default)]
    damage_type: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    budget: Option<String>,
}

pub fn estimate_payload(body: &str) -> Result<String, ApiError> {
    let request: EstimateRequest = parse_body(body)?;
    let mut errors = Vec::new();
    if request.damage_type.trim().is_empty() {
        errors.push(ValidationIssue {
            field: "damage_type",
            messages: vec!["damage_type must not be empty".to_string()],
        });
    }
    if request.severity.trim().is_empty() {
        errors.push(ValidationIssue {
            field: "severity",
            messages: vec!["severity must not be empty".to_string()],
        });
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(ValidationErrorResponse {
            status: "error",
            message: "Validation failed",
            errors,
        }));
    }
    to_json(&estimate(
        request.damage_type.trim(),
        request.severity.trim(),
        request.budget.as_deref(),
    ))
}

#[derive(Debug, Serialize)]
struct AssessmentListResponse<'a> {
    count: usize,
    assessments: &'a [Assessment],
}

pub fn assessments_get_payload(state: &AppState) -> Result<String, ApiError> {
    let log = state.assessments();
    to_json(&AssessmentListResponse {
        count: log.len(),
        assessments: log.entries(),
    })
}

pub fn assessments_post_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let input: AssessmentInput = parse_body(body)?;
    let assessment = submit_assessment(input, chrono::Utc::now())?;
    let payload = to_json(&serde_json::json!({
        "status": "ok",
        "message": format!(
            "Damage assessment recorded with {} health risks identified",
            assessment.health_risks.len()
        ),
        "assessment": &assessment,
    }))?;
    state.assessments().record(assessment);
    Ok(payload)
}

pub fn education_payload() -> Result<String, ApiError> {
    to_json(&serde_json::json!({
        "topics": TOPICS,
        "emergency_contacts": EMERGENCY_CONTACTS,
        "federal_assistance_url": FEDERAL_ASSISTANCE_URL,
    }))
}

pub fn education_topic_payload(id: &str) -> Result<String, ApiError> {
    let topic = topic(id).ok_or(ApiError::NotFound("Topic"))?;
    to_json(topic)
}
