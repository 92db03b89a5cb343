//! Wizard flow: profile, photos, analysis, results.
//!
//! ```text
//! Empty → ProfileCreated → PhotosUploaded → AnalysisComplete → ResultsViewed
//! ```
//!
//! Every mutation goes through [Wizard], which owns the storage port. Uploading
//! photos bumps a generation counter, deletes any stored analysis and cancels
//! an analysis in flight, so results can never describe a photo set the user
//! has since replaced.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::classifier::{AnalysisRecord, Classification, ClassifierError};
use crate::data::profile::{validate_profile, Profile, ProfileError};
use crate::engine::report::{build_results, ResultsReport};
use crate::session::photos::{assemble_photos, PhotoError, PhotoUpload};
use crate::session::store::{
    load_json, save_json, SessionStore, StoreError, ANALYSIS_KEY, PHOTOS_KEY, PROFILE_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    Empty,
    ProfileCreated,
    PhotosUploaded,
    AnalysisComplete,
    ResultsViewed,
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::ProfileCreated => write!(f, "ProfileCreated"),
            Self::PhotosUploaded => write!(f, "PhotosUploaded"),
            Self::AnalysisComplete => write!(f, "AnalysisComplete"),
            Self::ResultsViewed => write!(f, "ResultsViewed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Photo(#[from] PhotoError),
    #[error("Please upload at least one photo to analyze")]
    NoPhotos,
    #[error("cannot {action} before reaching {required} (currently {current})")]
    OutOfOrder {
        action: &'static str,
        required: WizardStage,
        current: WizardStage,
    },
    #[error("no analysis available; analyze photos first")]
    NoAnalysis,
    #[error("analysis result discarded: photos changed while it was running")]
    StaleAnalysis,
    #[error("analysis cancelled")]
    Cancelled,
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handed out by [Wizard::begin_analysis]; must be returned to
/// [Wizard::complete_analysis] for the result to be kept.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    generation: u64,
    photos: Vec<String>,
    cancel: CancellationToken,
}

impl AnalysisTicket {
    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub stage: WizardStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub photo_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisRecord>,
    pub analysis_in_flight: bool,
}

pub struct Wizard {
    store: Box<dyn SessionStore>,
    stage: WizardStage,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("stage", &self.stage)
            .field("generation", &self.generation)
            .field("analysis_in_flight", &self.in_flight.is_some())
            .finish()
    }
}

impl Wizard {
    /// Fresh wizard over an empty store.
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            stage: WizardStage::Empty,
            generation: 0,
            in_flight: None,
        }
    }

    /// Resume from whatever the store already holds. The stage is the furthest one
    /// the persisted keys support; a viewed-results marker is not persisted.
    pub fn restore(store: Box<dyn SessionStore>) -> Result<Self, FlowError> {
        let mut wizard = Self::new(store);
        let profile: Option<Profile> = load_json(&*wizard.store, PROFILE_KEY)?;
        if profile.is_some() {
            wizard.stage = WizardStage::ProfileCreated;
            let photos: Option<Vec<String>> = load_json(&*wizard.store, PHOTOS_KEY)?;
            if photos.is_some_and(|p| !p.is_empty()) {
                wizard.stage = WizardStage::PhotosUploaded;
                let analysis: Option<AnalysisRecord> =
                    load_json(&*wizard.store, ANALYSIS_KEY)?;
                if analysis.is_some() {
                    wizard.stage = WizardStage::AnalysisComplete;
                }
            }
        }
        info!(stage = %wizard.stage, "session restored");
        Ok(wizard)
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn profile(&self) -> Result<Option<Profile>, FlowError> {
        Ok(load_json(&*self.store, PROFILE_KEY)?)
    }

    pub fn photos(&self) -> Result<Vec<String>, FlowError> {
        Ok(load_json(&*self.store, PHOTOS_KEY)?.unwrap_or_default())
    }

    pub fn analysis(&self) -> Result<Option<AnalysisRecord>, FlowError> {
        Ok(load_json(&*self.store, ANALYSIS_KEY)?)
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, FlowError> {
        Ok(SessionSnapshot {
            stage: self.stage,
            profile: self.profile()?,
            photo_count: self.photos()?.len(),
            analysis: self.analysis()?,
            analysis_in_flight: self.in_flight.is_some(),
        })
    }

    /// Validate and persist the profile. Nothing is written when validation fails.
    /// Replacing the profile keeps photos and analysis; only the budget verdict
    /// depends on it and that is computed at read time.
    pub fn create_profile(&mut self, profile: Profile) -> Result<Profile, FlowError> {
        validate_profile(&profile)?;
        save_json(&mut *self.store, PROFILE_KEY, &profile)?;
        self.advance_to(WizardStage::ProfileCreated);
        info!(stage = %self.stage, "profile saved");
        Ok(profile)
    }

    /// Replace the photo set. Any previous analysis is invalidated.
    pub fn upload_photos(&mut self, uploads: Vec<PhotoUpload>) -> Result<usize, FlowError> {
        self.require(WizardStage::ProfileCreated, "upload photos")?;
        let photos = assemble_photos(uploads)?;
        self.store_photos(&photos)?;
        Ok(photos.len())
    }

    pub fn remove_photo(&mut self, index: usize) -> Result<usize, FlowError> {
        self.require(WizardStage::ProfileCreated, "remove photos")?;
        let mut photos = self.photos()?;
        if index >= photos.len() {
            return Err(PhotoError::NotFound(index).into());
        }
        photos.remove(index);
        self.store_photos(&photos)?;
        Ok(photos.len())
    }

    fn store_photos(&mut self, photos: &[String]) -> Result<(), FlowError> {
        self.invalidate_analysis()?;
        save_json(&mut *self.store, PHOTOS_KEY, photos)?;
        self.stage = if photos.is_empty() {
            WizardStage::ProfileCreated
        } else {
            WizardStage::PhotosUploaded
        };
        info!(
            photos = photos.len(),
            generation = self.generation,
            "photos stored; prior analysis invalidated"
        );
        Ok(())
    }

    fn invalidate_analysis(&mut self) -> Result<(), FlowError> {
        self.generation += 1;
        if let Some(token) = self.in_flight.take() {
            token.cancel();
            warn!("in-flight analysis cancelled");
        }
        self.store.remove(ANALYSIS_KEY)?;
        Ok(())
    }

    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, FlowError> {
        self.require(WizardStage::ProfileCreated, "analyze photos")?;
        let photos = self.photos()?;
        if photos.is_empty() {
            return Err(FlowError::NoPhotos);
        }
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        info!(photos = photos.len(), generation = self.generation, "analysis started");
        Ok(AnalysisTicket {
            generation: self.generation,
            photos,
            cancel,
        })
    }

    /// Keep a finished classification, unless the photos changed or the ticket
    /// was cancelled since [Wizard::begin_analysis].
    pub fn complete_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        classification: &Classification,
    ) -> Result<AnalysisRecord, FlowError> {
        if ticket.cancel.is_cancelled() || ticket.generation != self.generation {
            warn!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "stale analysis discarded"
            );
            return Err(FlowError::StaleAnalysis);
        }
        let record = AnalysisRecord::from(classification);
        save_json(&mut *self.store, ANALYSIS_KEY, &record)?;
        self.in_flight = None;
        self.stage = WizardStage::AnalysisComplete;
        info!(
            damage_type = %record.damage_type,
            severity = %record.severity,
            confidence = %record.confidence,
            "analysis complete"
        );
        Ok(record)
    }

    /// Drop the in-flight marker for a ticket whose run failed, so a retry can start.
    pub fn abandon_analysis(&mut self, ticket: &AnalysisTicket) {
        if ticket.generation == self.generation && !ticket.cancel.is_cancelled() {
            self.in_flight = None;
        }
    }

    pub fn results(&mut self) -> Result<ResultsReport, FlowError> {
        let analysis = self.analysis()?.ok_or(FlowError::NoAnalysis)?;
        let profile = self.profile()?;
        let photo_count = self.photos()?.len();
        let report = build_results(profile.as_ref(), photo_count, &analysis);
        self.advance_to(WizardStage::ResultsViewed);
        Ok(report)
    }

    /// Forget everything and cancel any analysis still running.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.generation += 1;
        self.store.clear()?;
        self.stage = WizardStage::Empty;
        info!("session reset");
        Ok(())
    }

    fn require(&self, required: WizardStage, action: &'static str) -> Result<(), FlowError> {
        if self.stage < required {
            return Err(FlowError::OutOfOrder {
                action,
                required,
                current: self.stage,
            });
        }
        Ok(())
    }

    fn advance_to(&mut self, stage: WizardStage) {
        self.stage = self.stage.max(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{DamageClassifier, FixedClassifier};
    use crate::data::catalog::{DamageType, Severity};
    use crate::session::store::MemoryStore;

    fn profile() -> Profile {
        Profile {
            name: "Ari".to_string(),
            address: "9 Quay St".to_string(),
            budget: "$5,000".to_string(),
            consent: true,
        }
    }

    fn photo(index: usize) -> PhotoUpload {
        PhotoUpload {
            index,
            data_uri: format!("data:image/png;base64,cGhvdG8{index}"),
        }
    }

    fn classification() -> Classification {
        FixedClassifier::new(DamageType::WaterDamage, Severity::Minor, 90.0)
            .classify(&["x".to_string()])
            .unwrap()
    }

    #[test]
    fn invalid_profile_persists_nothing() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        let err = wizard
            .create_profile(Profile {
                consent: false,
                ..profile()
            })
            .unwrap_err();
        assert!(matches!(err, FlowError::Profile(ProfileError::ConsentRequired)));
        assert_eq!(wizard.stage(), WizardStage::Empty);
        assert_eq!(wizard.profile().unwrap(), None);
    }

    #[test]
    fn upload_before_profile_is_out_of_order() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        let err = wizard.upload_photos(vec![photo(0)]).unwrap_err();
        assert!(matches!(
            err,
            FlowError::OutOfOrder {
                required: WizardStage::ProfileCreated,
                current: WizardStage::Empty,
                ..
            }
        ));
    }

    #[test]
    fn analysis_needs_photos() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        wizard.create_profile(profile()).unwrap();
        assert!(matches!(wizard.begin_analysis(), Err(FlowError::NoPhotos)));
    }

    #[test]
    fn reupload_invalidates_previous_analysis() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        wizard.create_profile(profile()).unwrap();
        wizard.upload_photos(vec![photo(0)]).unwrap();
        let ticket = wizard.begin_analysis().unwrap();
        wizard.complete_analysis(&ticket, &classification()).unwrap();
        assert_eq!(wizard.stage(), WizardStage::AnalysisComplete);

        wizard.upload_photos(vec![photo(0), photo(1)]).unwrap();
        assert_eq!(wizard.stage(), WizardStage::PhotosUploaded);
        assert_eq!(wizard.analysis().unwrap(), None);
        assert!(matches!(wizard.results(), Err(FlowError::NoAnalysis)));
    }

    #[test]
    fn completion_after_reupload_is_stale() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        wizard.create_profile(profile()).unwrap();
        wizard.upload_photos(vec![photo(0)]).unwrap();
        let ticket = wizard.begin_analysis().unwrap();
        wizard.upload_photos(vec![photo(0)]).unwrap();

        assert!(ticket.cancel_token().is_cancelled());
        assert!(matches!(
            wizard.complete_analysis(&ticket, &classification()),
            Err(FlowError::StaleAnalysis)
        ));
        assert_eq!(wizard.analysis().unwrap(), None);
    }

    #[test]
    fn remove_photo_checks_bounds() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        wizard.create_profile(profile()).unwrap();
        wizard.upload_photos(vec![photo(0), photo(1)]).unwrap();
        assert_eq!(wizard.remove_photo(0).unwrap(), 1);
        assert!(matches!(
            wizard.remove_photo(5),
            Err(FlowError::Photo(PhotoError::NotFound(5)))
        ));
    }

    #[test]
    fn restore_infers_stage_from_store() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        wizard.create_profile(profile()).unwrap();
        wizard.upload_photos(vec![photo(0)]).unwrap();
        let ticket = wizard.begin_analysis().unwrap();
        wizard.complete_analysis(&ticket, &classification()).unwrap();

        let mut store = MemoryStore::new();
        for key in [PROFILE_KEY, PHOTOS_KEY, ANALYSIS_KEY] {
            let value = wizard.store.get(key).unwrap().unwrap();
            store.set(key, value).unwrap();
        }
        let restored = Wizard::restore(Box::new(store)).unwrap();
        assert_eq!(restored.stage(), WizardStage::AnalysisComplete);
    }

    #[test]
    fn reset_clears_everything() {
        let mut wizard = Wizard::new(Box::new(MemoryStore::new()));
        wizard.create_profile(profile()).unwrap();
        wizard.upload_photos(vec![photo(0)]).unwrap();
        let ticket = wizard.begin_analysis().unwrap();
        wizard.reset().unwrap();
        assert!(ticket.cancel_token().is_cancelled());
        assert_eq!(wizard.stage(), WizardStage::Empty);
        assert_eq!(wizard.snapshot().unwrap().photo_count, 0);
    }
}
