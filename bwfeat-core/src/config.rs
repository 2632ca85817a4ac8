use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::FeaturizeError;

pub const DEFAULT_BLUR_INTERCEPT: f64 = 1.0;
pub const DEFAULT_BLUR_ORDER: i64 = 0;
pub const DEFAULT_BLUR_PRECISION: i64 = 3;
pub const DEFAULT_MAX_FRAGLEN: i64 = 300;

///
/// Options recognised by the extractors. Every key is optional in the TOML file.
///
/// Integers are kept signed so that a negative `max_fraglen` or `blur_order`
/// reaches the extractor and is reported as a configuration error instead of a
/// parse failure.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractorConfig {
    /// `None` disables blurring entirely.
    pub blur_slope: Option<f64>,
    pub blur_intercept: f64,
    pub blur_order: i64,
    pub blur_precision: i64,
    pub max_fraglen: i64,
    /// Only used by the bigWig extractors.
    pub local_norm_halfwidth: Option<u32>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            blur_slope: None,
            blur_intercept: DEFAULT_BLUR_INTERCEPT,
            blur_order: DEFAULT_BLUR_ORDER,
            blur_precision: DEFAULT_BLUR_PRECISION,
            max_fraglen: DEFAULT_MAX_FRAGLEN,
            local_norm_halfwidth: None,
        }
    }
}

impl TryFrom<&Path> for ExtractorConfig {
    type Error = FeaturizeError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

impl TryFrom<&str> for ExtractorConfig {
    type Error = FeaturizeError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        ExtractorConfig::try_from(Path::new(path))
    }
}
