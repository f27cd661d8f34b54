//! Domain layer: Core business types.
//!
//! Pure types with no I/O: the patient profile that is submitted and the
//! risk report that comes back.

mod diagnosis;
mod patient;

pub use diagnosis::{DiseaseRisk, PredictionResult, RiskLevel};
pub use patient::{
    parse_raw, Alcohol, BpMedication, ChoiceOption, Cholesterol, CodedChoice, Exercise,
    FieldControl, FormSection, Insurance, PatientProfile, ProfileField, Sex, UnknownFieldError,
    YesNo,
};
