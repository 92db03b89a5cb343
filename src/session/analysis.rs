//! Running a classification against the session, with the simulated latency and
//! cancellation made explicit.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{info, warn};

use crate::classifier::{AnalysisRecord, Classification, DamageClassifier};
use crate::session::flow::{AnalysisTicket, FlowError, Wizard};

pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_secs(3);

/// Wait out `delay`, then classify the ticket's photos. Returns
/// [FlowError::Cancelled] if the ticket is cancelled first.
pub async fn run_analysis(
    classifier: &dyn DamageClassifier,
    ticket: &AnalysisTicket,
    delay: Duration,
) -> Result<Classification, FlowError> {
    tokio::select! {
        _ = ticket.cancel_token().cancelled() => Err(FlowError::Cancelled),
        _ = tokio::time::sleep(delay) => {
            if ticket.cancel_token().is_cancelled() {
                return Err(FlowError::Cancelled);
            }
            Ok(classifier.classify(ticket.photos())?)
        }
    }
}

/// Begin, wait, and complete an analysis on a shared wizard. The lock is only
/// held for the begin and complete steps, so other requests (a re-upload, a
/// reset) can run while the classifier is waiting and will invalidate it.
pub async fn analyze_session(
    wizard: &Mutex<Wizard>,
    classifier: &dyn DamageClassifier,
    delay: Duration,
) -> Result<AnalysisRecord, FlowError> {
    let ticket = {
        let mut guard = wizard.lock().unwrap_or_else(PoisonError::into_inner);
        guard.begin_analysis()?
    };
    info!(
        classifier = classifier.name(),
        delay_ms = delay.as_millis() as u64,
        "classifying photos"
    );

    let outcome = run_analysis(classifier, &ticket, delay).await;

    let mut guard = wizard.lock().unwrap_or_else(PoisonError::into_inner);
    match outcome {
        Ok(classification) => guard.complete_analysis(&ticket, &classification),
        Err(err) => {
            warn!(error = %err, "analysis did not complete");
            guard.abandon_analysis(&ticket);
            Err(err)
        }
    }
}
