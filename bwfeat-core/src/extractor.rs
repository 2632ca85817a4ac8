use ndarray::Array4;

use crate::errors::{FeaturizeError, Result};
use crate::models::Interval;

///
/// Something that turns a list of same-width intervals into a dense
/// `(intervals, channels, sub_channels, width)` tensor.
///
pub trait Extractor {
    /// Whether independent workers may each run this extractor at the same time.
    /// Extractors holding a lazily filled cache report `false`.
    const MULTIPROCESSING_SAFE: bool;

    ///
    /// Extract features for every interval.
    ///
    /// # Arguments
    /// - intervals: intervals of identical width
    /// - to_mirror: optional per-interval flags; flagged rows are mirrored after extraction
    fn extract(&mut self, intervals: &[Interval], to_mirror: Option<&[bool]>)
    -> Result<Array4<f32>>;
}

///
/// Check an extraction request before any work is done and return the
/// shared interval width.
///
pub fn validate_request(intervals: &[Interval], to_mirror: Option<&[bool]>) -> Result<u32> {
    let first = intervals.first().ok_or(FeaturizeError::EmptyIntervals)?;
    first.validate()?;
    let expected = first.width();

    for (index, interval) in intervals.iter().enumerate().skip(1) {
        interval.validate()?;
        if interval.width() != expected {
            return Err(FeaturizeError::MismatchedWidths {
                index,
                expected,
                found: interval.width(),
            });
        }
    }

    if let Some(flags) = to_mirror {
        if flags.len() != intervals.len() {
            return Err(FeaturizeError::MirrorLengthMismatch {
                expected: intervals.len(),
                found: flags.len(),
            });
        }
    }

    Ok(expected)
}
