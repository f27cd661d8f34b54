//! Predictor port: Trait for the remote risk prediction service.
//!
//! This trait abstracts the transport (HTTP via reqwest) from the intake
//! controller and the terminal front end.

use serde::Deserialize;

use crate::domain::{PatientProfile, PredictionResult};

/// Failure talking to the prediction service.
///
/// The detail is for logs only; users see a single fixed message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    /// Connection refused, DNS failure, timeout, or a broken response stream
    #[error("prediction service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("prediction service returned HTTP {0}")]
    Status(u16),

    /// The body is not a disease -> {probability, risk_level} map
    #[error("malformed prediction response: {0}")]
    MalformedBody(String),
}

/// Body of the service's status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    pub status: String,
}

/// Trait for prediction service calls.
///
/// Calls block; the terminal front end runs them on a worker thread.
pub trait Predictor: Send + Sync {
    /// Submit a complete profile and return the per-disease report.
    ///
    /// # Errors
    /// Returns `PredictionError` on transport failure, non-success status, or
    /// an unexpected body.
    fn predict(&self, profile: &PatientProfile) -> Result<PredictionResult, PredictionError>;

    /// Probe the service status endpoint.
    ///
    /// # Errors
    /// Returns `PredictionError` if the service cannot be reached.
    fn health(&self) -> Result<ServiceStatus, PredictionError>;
}
