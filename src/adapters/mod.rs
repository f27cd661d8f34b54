//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the prediction service

pub mod http;
