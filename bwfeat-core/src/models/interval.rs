use std::fmt::{self, Display};

use crate::errors::{FeaturizeError, Result};

///
/// Interval struct, one genomic window to extract features for.
/// Coordinates are zero-based, half-open: `[start, stop)`.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Interval {
    pub chrom: String,
    pub start: u32,
    pub stop: u32,

    pub score: Option<f32>,
}

impl Interval {
    pub fn new<S: Into<String>>(chrom: S, start: u32, stop: u32) -> Self {
        Interval {
            chrom: chrom.into(),
            start,
            stop,
            score: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    ///
    /// Get the number of positions covered by the interval
    ///
    pub fn width(&self) -> u32 {
        self.stop.saturating_sub(self.start)
    }

    /// Midpoint as `(start + stop) / 2`, rounded down.
    pub fn mid_point(&self) -> u32 {
        ((self.start as u64 + self.stop as u64) / 2) as u32
    }

    ///
    /// Check that the interval is non-empty (`stop > start`)
    ///
    pub fn validate(&self) -> Result<()> {
        if self.stop <= self.start {
            return Err(FeaturizeError::InvalidInterval(format!(
                "{} (stop must be greater than start)",
                self.as_string()
            )));
        }
        Ok(())
    }

    ///
    /// Get the `chrom:start-stop` form of the interval
    ///
    pub fn as_string(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.start, self.stop)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
