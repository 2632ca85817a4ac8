use std::path::{Path, PathBuf};

use log::{info, warn};
use ndarray::{Array4, ArrayView1, s};

use bwfeat_core::mirror::mirror;
use bwfeat_core::models::Interval;
use bwfeat_core::{Extractor, FeaturizeError, Result, validate_request};
use bwfeat_io::ResultCache;

use crate::bigwig::{BigWigReader, open_bigwig, read_bigwig_interval};
use crate::norm::{NormWindow, normalize_window};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturizeOptions {
    /// Reduce every window to the mean signal per file.
    pub average: bool,
    /// Directory of the on-disk result cache.
    pub cache_dir: Option<PathBuf>,
}

///
/// Window of `length` positions centred on `interval`, or `None` when it
/// would start before position 0. With `average` and `length == 0` the
/// interval's own bounds are used.
///
pub fn feature_window(interval: &Interval, length: u32, average: bool) -> Option<(u32, u32)> {
    if average && length == 0 {
        return Some((interval.start, interval.stop));
    }

    let center = interval.mid_point() as i64;
    let left = center - (length / 2) as i64;
    if left < 0 {
        return None;
    }
    let right = left + length as i64;
    Some((left as u32, right as u32))
}

///
/// Signal of several bigWig files over fixed-length windows centred on each
/// interval.
///
/// Returns `(kept, 1, signals, length)`, or `(kept, 1, 1, signals)` holding
/// the per-file window means when `options.average` is set. Intervals whose
/// window would start before position 0 are left out, so `kept` can be smaller
/// than the number of intervals.
///
/// # Arguments
/// - signals: bigWig files, one output channel each
/// - length: window length
/// - intervals: intervals to centre windows on
/// - options: averaging and result caching
pub fn featurize(
    signals: &[PathBuf],
    length: u32,
    intervals: &[Interval],
    options: &FeaturizeOptions,
) -> Result<Array4<f32>> {
    if signals.is_empty() {
        return Err(FeaturizeError::InvalidConfig("no signal files given".to_string()));
    }
    if intervals.is_empty() {
        return Err(FeaturizeError::EmptyIntervals);
    }
    if length == 0 && !options.average {
        return Err(FeaturizeError::InvalidConfig(
            "length must be positive unless averaging".to_string(),
        ));
    }
    for interval in intervals {
        interval.validate()?;
    }

    let cache = options.cache_dir.as_ref().map(ResultCache::new);
    let key = ResultCache::key(signals, intervals);
    if let Some(cache) = &cache {
        if let Some(data) = cache.load(&key, length, signals.len(), options.average)? {
            return Ok(data);
        }
    }

    let mut windows = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match feature_window(interval, length, options.average) {
            Some((left, right)) => windows.push((interval.chrom.as_str(), left, right)),
            None => warn!(
                "Didn't include {} because the resulting window overhangs the start of the chromosome",
                interval
            ),
        }
    }

    let mut readers = signals
        .iter()
        .map(|path| open_bigwig(path))
        .collect::<Result<Vec<BigWigReader>>>()?;

    let data = if options.average {
        average_windows(&mut readers, &windows)?
    } else {
        signal_windows(&mut readers, &windows, length as usize)?
    };

    info!(
        "Featurized {} of {} intervals over {} signals",
        windows.len(),
        intervals.len(),
        signals.len()
    );

    if let Some(cache) = &cache {
        cache.store(&key, length, options.average, &data)?;
    }

    Ok(data)
}

/// [`featurize`] with `average` set.
pub fn average(
    signals: &[PathBuf],
    length: u32,
    intervals: &[Interval],
    cache_dir: Option<&Path>,
) -> Result<Array4<f32>> {
    let options = FeaturizeOptions {
        average: true,
        cache_dir: cache_dir.map(Path::to_path_buf),
    };
    featurize(signals, length, intervals, &options)
}

fn signal_windows(
    readers: &mut [BigWigReader],
    windows: &[(&str, u32, u32)],
    length: usize,
) -> Result<Array4<f32>> {
    let mut data = Array4::<f32>::zeros((windows.len(), 1, readers.len(), length));
    let mut buf = vec![0f32; length];

    for (row, (chrom, left, right)) in windows.iter().enumerate() {
        for (channel, reader) in readers.iter_mut().enumerate() {
            read_bigwig_interval(reader, chrom, *left, *right, &mut buf)?;
            data.slice_mut(s![row, 0, channel, ..])
                .assign(&ArrayView1::from(&buf[..]));
        }
    }

    Ok(data)
}

fn average_windows(readers: &mut [BigWigReader], windows: &[(&str, u32, u32)]) -> Result<Array4<f32>> {
    let mut data = Array4::<f32>::zeros((windows.len(), 1, 1, readers.len()));

    for (row, (chrom, left, right)) in windows.iter().enumerate() {
        let mut buf = vec![0f32; (right - left) as usize];
        for (channel, reader) in readers.iter_mut().enumerate() {
            read_bigwig_interval(reader, chrom, *left, *right, &mut buf)?;
            let sum: f64 = buf.iter().map(|&v| v as f64).sum();
            data[[row, 0, 0, channel]] = (sum / buf.len() as f64) as f32;
        }
    }

    Ok(data)
}

///
/// Per-base signal of several bigWig files, shape `(intervals, 1, signals, width)`.
///
/// Local normalisation, when enabled, is applied to every signal channel
/// independently.
///
#[derive(Debug, Clone)]
pub struct BigwigBinaryExtractor {
    signals: Vec<PathBuf>,
    local_norm_halfwidth: Option<u32>,
    cache_dir: Option<PathBuf>,
}

impl BigwigBinaryExtractor {
    pub fn new(signals: Vec<PathBuf>, local_norm_halfwidth: Option<u32>, cache_dir: Option<PathBuf>) -> Self {
        BigwigBinaryExtractor {
            signals,
            local_norm_halfwidth,
            cache_dir,
        }
    }

    pub fn signals(&self) -> &[PathBuf] {
        &self.signals
    }

    fn options(&self) -> FeaturizeOptions {
        FeaturizeOptions {
            average: false,
            cache_dir: self.cache_dir.clone(),
        }
    }
}

impl Extractor for BigwigBinaryExtractor {
    const MULTIPROCESSING_SAFE: bool = true;

    fn extract(&mut self, intervals: &[Interval], to_mirror: Option<&[bool]>) -> Result<Array4<f32>> {
        let width = validate_request(intervals, to_mirror)?;

        let mut data = match self.local_norm_halfwidth {
            None => featurize(&self.signals, width, intervals, &self.options())?,
            Some(h) => {
                let windows = intervals
                    .iter()
                    .map(|interval| NormWindow::around(interval, h))
                    .collect::<Result<Vec<_>>>()?;
                let widened: Vec<Interval> = intervals
                    .iter()
                    .zip(&windows)
                    .map(|(interval, window)| window.as_interval(&interval.chrom))
                    .collect();

                let window_len = windows[0].len() as u32;
                let raw = featurize(&self.signals, window_len, &widened, &self.options())?;
                check_rows(&raw, intervals.len())?;

                let mut data = Array4::<f32>::zeros((intervals.len(), 1, self.signals.len(), width as usize));
                for (row, window) in windows.iter().enumerate() {
                    for channel in 0..self.signals.len() {
                        normalize_window(
                            raw.slice(s![row, 0, channel, ..]),
                            window.skip,
                            data.slice_mut(s![row, 0, channel, ..]),
                        );
                    }
                }
                data
            }
        };
        check_rows(&data, intervals.len())?;

        if let Some(flags) = to_mirror {
            mirror(&mut data, flags);
        }

        Ok(data)
    }
}

fn check_rows(data: &Array4<f32>, expected: usize) -> Result<()> {
    if data.dim().0 != expected {
        return Err(FeaturizeError::BigWig(format!(
            "featurizer returned {} rows for {} intervals",
            data.dim().0,
            expected
        )));
    }
    Ok(())
}
