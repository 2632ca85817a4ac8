//! Local z-score normalisation of signal windows.
//!
//! With a half-width `h`, each interval is widened (or narrowed) symmetrically
//! to a window of about `2h` positions. The window's mean and population
//! standard deviation are then used to scale the central `width` positions.

use ndarray::{ArrayView1, ArrayViewMut1, s};

use bwfeat_core::models::Interval;
use bwfeat_core::{FeaturizeError, Result};

/// Region read around an interval for local normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormWindow {
    pub start: u32,
    pub stop: u32,
    /// Position of the interval's first base inside the window.
    pub skip: usize,
}

impl NormWindow {
    ///
    /// Window around `interval` for half-width `halfwidth`.
    ///
    /// Fails when the half-width is smaller than half the interval width or
    /// when the window would start before position 0.
    pub fn around(interval: &Interval, halfwidth: u32) -> Result<Self> {
        let width = interval.width() as i64;
        let offset = width / 2 - halfwidth as i64;
        if offset > 0 {
            return Err(FeaturizeError::InvalidConfig(format!(
                "local_norm_halfwidth {} is smaller than half the interval width {}",
                halfwidth, width
            )));
        }

        let start = interval.start as i64 + offset;
        let stop = interval.stop as i64 - offset;
        if start < 0 {
            return Err(FeaturizeError::InvalidConfig(format!(
                "normalisation window {}:{}-{} starts before the chromosome",
                interval.chrom, start, stop
            )));
        }
        let stop = u32::try_from(stop).map_err(|_| {
            FeaturizeError::InvalidInterval(format!("window end {} overflows", stop))
        })?;

        Ok(NormWindow {
            start: start as u32,
            stop,
            skip: (-offset) as usize,
        })
    }

    pub fn len(&self) -> usize {
        (self.stop - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }

    pub fn as_interval(&self, chrom: &str) -> Interval {
        Interval::new(chrom, self.start, self.stop)
    }
}

///
/// Write `(window[skip..skip + out.len()] - mean) / std` into `out`, with the
/// mean and population standard deviation taken over the whole window.
/// A flat window is only mean-centred.
///
pub fn normalize_window(window: ArrayView1<f32>, skip: usize, mut out: ArrayViewMut1<f32>) {
    let n = window.len() as f64;
    let mean = window.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = window.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;
    let std = var.sqrt();
    let scale = if std > 0.0 { 1.0 / std } else { 1.0 };

    let width = out.len();
    let centre = window.slice(s![skip..skip + width]);
    for (o, &v) in out.iter_mut().zip(centre.iter()) {
        *o = ((v as f64 - mean) * scale) as f32;
    }
}
