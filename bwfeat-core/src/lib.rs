//! # Core types for bwfeat
//!
//! Shared building blocks for the feature extractors: the [`models::Interval`]
//! and [`models::IntervalSet`] models, the [`extractor::Extractor`] trait every
//! data source implements, the error type, extractor configuration and the
//! mirroring helpers applied after extraction.
//!
pub mod config;
pub mod errors;
pub mod extractor;
pub mod mirror;
pub mod models;
pub mod utils;

// re-exports
pub use config::ExtractorConfig;
pub use errors::{FeaturizeError, Result};
pub use extractor::{Extractor, validate_request};
