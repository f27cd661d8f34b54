//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the intake client's two views:
//! - Patient health profile form
//! - Per-disease risk assessment report

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::VitalTheme;
pub use worker::{SettlementInbox, SubmissionWorker};
