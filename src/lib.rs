//! # VitalRisk
//!
//! Terminal intake client for multi-disease clinical risk prediction.
//!
//! This crate provides:
//! - A patient profile model matching the prediction service's wire format
//! - An intake controller owning form, loading, error and result state
//! - An HTTP client for the remote prediction service
//! - Terminal UI for editing the profile and reading the risk report
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (PatientProfile, PredictionResult, RiskLevel)
//! - `ports`: Trait definition for the prediction service
//! - `adapters`: Concrete implementation over HTTP (reqwest)
//! - `application`: The intake state machine
//! - `config`: Endpoint configuration from the environment
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{IntakeController, IntakeEvent, View};
pub use domain::{PatientProfile, PredictionResult, RiskLevel};

/// Result type for VitalRisk operations
pub type Result<T> = std::result::Result<T, VitalRiskError>;

/// Main error type for VitalRisk
#[derive(Debug, thiserror::Error)]
pub enum VitalRiskError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid profile edit: {0}")]
    UnknownField(#[from] domain::UnknownFieldError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
