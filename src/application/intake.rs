//! Intake controller: the form/submission/result state machine.
//!
//! The controller owns every piece of mutable client state and performs no
//! I/O. A submission yields a [`Dispatch`]; whoever executes it feeds the
//! resulting [`Settlement`] back in. Settlements carry the ticket of the
//! submission they answer, and only the in-flight ticket may change state.

use std::fmt;

use crate::domain::{parse_raw, PatientProfile, PredictionResult, ProfileField};
use crate::ports::{PredictionError, Predictor};

/// Shown for every transport or response failure.
pub const SERVICE_UNREACHABLE_MESSAGE: &str =
    "Unable to connect to the prediction engine. Is the backend running?";

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionTicket(u64);

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primary view derived from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Results,
}

/// Lifecycle state derived from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Editing,
    Submitting,
    Results,
    Failed,
}

/// An outbound request the caller must execute.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub ticket: SubmissionTicket,
    pub profile: PatientProfile,
}

impl Dispatch {
    /// Run the request synchronously and package the outcome.
    pub fn execute(self, predictor: &dyn Predictor) -> Settlement {
        Settlement {
            ticket: self.ticket,
            outcome: predictor.predict(&self.profile),
        }
    }
}

/// Outcome of a dispatched request.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub ticket: SubmissionTicket,
    pub outcome: Result<PredictionResult, PredictionError>,
}

/// User actions and request settlements.
#[derive(Debug, Clone)]
pub enum IntakeEvent {
    Edit { field: ProfileField, raw: String },
    Submit,
    Reset,
    Settled(Settlement),
}

/// Owner of the intake form state.
#[derive(Debug, Default)]
pub struct IntakeController {
    profile: PatientProfile,
    prediction: Option<PredictionResult>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    in_flight: Option<SubmissionTicket>,
}

impl IntakeController {
    /// Start in the editing state with the default profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn profile(&self) -> &PatientProfile {
        &self.profile
    }

    #[must_use]
    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Ticket of the outstanding submission, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<SubmissionTicket> {
        self.in_flight
    }

    #[must_use]
    pub fn view(&self) -> View {
        if self.prediction.is_some() {
            View::Results
        } else {
            View::Form
        }
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        if self.loading {
            Lifecycle::Submitting
        } else if self.prediction.is_some() {
            Lifecycle::Results
        } else if self.error.is_some() {
            Lifecycle::Failed
        } else {
            Lifecycle::Editing
        }
    }

    /// Apply one event. Returns the request to issue, if the event starts one.
    pub fn apply(&mut self, event: IntakeEvent) -> Option<Dispatch> {
        match event {
            IntakeEvent::Edit { field, raw } => {
                self.edit_field(field, &raw);
                None
            }
            IntakeEvent::Submit => self.submit(),
            IntakeEvent::Reset => {
                self.reset();
                None
            }
            IntakeEvent::Settled(settlement) => {
                self.settle(settlement);
                None
            }
        }
    }

    /// Re-parse `raw` into `field`. Unparsable input is stored as `NaN`.
    ///
    /// Returns the stored value.
    pub fn edit_field(&mut self, field: ProfileField, raw: &str) -> f64 {
        let value = parse_raw(raw);
        self.profile = self.profile.with_field(field, value);
        tracing::debug!(field = field.key(), "Profile field edited");
        value
    }

    /// [`edit_field`](Self::edit_field) addressed by wire key.
    ///
    /// # Errors
    /// Returns `VitalRiskError::UnknownField` if `name` is not a profile key.
    pub fn edit_field_by_name(&mut self, name: &str, raw: &str) -> crate::Result<f64> {
        let field: ProfileField = name.parse()?;
        Ok(self.edit_field(field, raw))
    }

    /// Begin a submission of the current profile.
    ///
    /// Returns `None` while another submission is outstanding.
    pub fn submit(&mut self) -> Option<Dispatch> {
        if let Some(ticket) = self.in_flight {
            tracing::debug!(%ticket, "Submission ignored: request already in flight");
            return None;
        }

        self.issued += 1;
        let ticket = SubmissionTicket(self.issued);
        self.in_flight = Some(ticket);
        self.loading = true;
        self.error = None;
        self.prediction = None;

        tracing::info!(%ticket, "Submitting profile for analysis");
        Some(Dispatch {
            ticket,
            profile: self.profile,
        })
    }

    /// Apply a settled request.
    ///
    /// Returns `false` if the settlement is stale (its submission was
    /// abandoned or superseded) and was discarded.
    pub fn settle(&mut self, settlement: Settlement) -> bool {
        let Settlement { ticket, outcome } = settlement;
        if self.in_flight != Some(ticket) {
            tracing::debug!(%ticket, "Discarding stale settlement");
            return false;
        }

        self.in_flight = None;
        self.loading = false;
        match outcome {
            Ok(result) => {
                tracing::info!(%ticket, diseases = result.len(), "Risk report received");
                self.error = None;
                self.prediction = Some(result);
            }
            Err(e) => {
                tracing::warn!(%ticket, "Prediction request failed: {}", e);
                self.prediction = None;
                self.error = Some(SERVICE_UNREACHABLE_MESSAGE.to_string());
            }
        }
        true
    }

    /// Clear result and error and return to the form. Field values are kept.
    ///
    /// An outstanding submission is abandoned; its settlement will be discarded.
    pub fn reset(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            tracing::info!(%ticket, "Abandoning in-flight submission");
        }
        self.loading = false;
        self.prediction = None;
        self.error = None;
    }
}
