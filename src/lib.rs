//! Billing engine library crate.
//!
//! This crate exposes the cost allocation engine and its supporting
//! pure helpers as reusable modules. External applications may depend
//! on `billing_engine` and call `engine::compute_costs` directly, or
//! embed the HTTP surface via `api::build_router`.

pub mod aggregate;
pub mod api;
pub mod classify;
pub mod config;
pub mod engine;
pub mod models;
pub mod timeparse;

pub use config::ConfigError;
pub use models::{CostResult, PricingConfig, Request, UrgencyTier};
