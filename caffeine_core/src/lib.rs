#![forbid(unsafe_code)]

//! Core domain model and computation for the caffeine intake simulator.
//!
//! This crate provides:
//! - Domain types (sources, consumption events, user settings)
//! - Catalog and persona preset ingestion
//! - The exponential decay model and time-series sampler
//! - Personalized safety limits
//! - Wake/sleep window policy and chart model assembly

pub mod types;
pub mod error;
pub mod catalog;
pub mod personas;
pub mod config;
pub mod logging;
pub mod decay;
pub mod series;
pub mod limits;
pub mod schedule;
pub mod journal;
pub mod chart;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use personas::Personas;
pub use config::Config;
pub use decay::{level_at, HALF_LIFE_HOURS};
pub use series::{sample, SamplePoint, DEFAULT_STEP_MINUTES};
pub use limits::{personal_limits, PersonalLimits};
pub use journal::{seed_sample_day, ConsumptionJournal};
pub use chart::{build_chart_model, ChartModel};
