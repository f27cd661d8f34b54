//! Application layer: Use cases and services.
//!
//! Holds the intake controller, the single owner of form, loading, error and
//! result state.

mod intake;

pub use intake::{
    Dispatch, IntakeController, IntakeEvent, Lifecycle, Settlement, SubmissionTicket, View,
    SERVICE_UNREACHABLE_MESSAGE,
};
