use std::path::{Path, PathBuf};

use ndarray::{Array1, Array4, s};

use bwfeat_core::mirror::mirror;
use bwfeat_core::models::Interval;
use bwfeat_core::{Extractor, Result, validate_request};

use crate::bigwig::{open_bigwig, read_bigwig_interval};
use crate::norm::{NormWindow, normalize_window};

///
/// Per-base signal of one bigWig file, shape `(intervals, 1, 1, width)`.
///
/// With `local_norm_halfwidth` set, each interval is z-scored against the
/// signal in a window of that half-width around its centre.
///
#[derive(Debug, Clone)]
pub struct BigwigExtractor {
    path: PathBuf,
    local_norm_halfwidth: Option<u32>,
}

impl BigwigExtractor {
    pub fn new<P: Into<PathBuf>>(path: P, local_norm_halfwidth: Option<u32>) -> Self {
        BigwigExtractor {
            path: path.into(),
            local_norm_halfwidth,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn local_norm_halfwidth(&self) -> Option<u32> {
        self.local_norm_halfwidth
    }
}

impl Extractor for BigwigExtractor {
    const MULTIPROCESSING_SAFE: bool = true;

    fn extract(&mut self, intervals: &[Interval], to_mirror: Option<&[bool]>) -> Result<Array4<f32>> {
        let width = validate_request(intervals, to_mirror)? as usize;

        let windows = match self.local_norm_halfwidth {
            Some(h) => Some(
                intervals
                    .iter()
                    .map(|interval| NormWindow::around(interval, h))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        let mut reader = open_bigwig(&self.path)?;
        let mut data = Array4::<f32>::zeros((intervals.len(), 1, 1, width));

        for (index, interval) in intervals.iter().enumerate() {
            let mut out = data.slice_mut(s![index, 0, 0, ..]);
            match &windows {
                Some(windows) => {
                    let window = &windows[index];
                    let mut values = vec![0f32; window.len()];
                    read_bigwig_interval(&mut reader, &interval.chrom, window.start, window.stop, &mut values)?;
                    normalize_window(Array1::from_vec(values).view(), window.skip, out);
                }
                None => {
                    let mut values = vec![0f32; width];
                    read_bigwig_interval(&mut reader, &interval.chrom, interval.start, interval.stop, &mut values)?;
                    out.assign(&Array1::from_vec(values));
                }
            }
        }

        if let Some(flags) = to_mirror {
            mirror(&mut data, flags);
        }

        Ok(data)
    }
}
