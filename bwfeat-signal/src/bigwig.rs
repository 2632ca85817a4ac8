use std::path::Path;

use bigtools::BigWigRead;
use bigtools::utils::reopen::ReopenableFile;
use log::warn;

use bwfeat_core::{FeaturizeError, Result};

pub type BigWigReader = BigWigRead<ReopenableFile>;

pub fn open_bigwig(path: &Path) -> Result<BigWigReader> {
    let path_str = path
        .to_str()
        .ok_or_else(|| FeaturizeError::BigWig(format!("{:?} is not valid UTF-8", path)))?;

    BigWigRead::open_file(path_str)
        .map_err(|e| FeaturizeError::BigWig(format!("Can't open {}: {}", path.display(), e)))
}

/// Length of `chrom` in the bigWig header, if present.
pub fn chrom_length(reader: &BigWigReader, chrom: &str) -> Option<u32> {
    reader
        .chroms()
        .iter()
        .find(|info| info.name == chrom)
        .map(|info| info.length)
}

///
/// Read the signal over `[start, stop)` into `out`.
///
/// Positions covered by a bigWig record take its value, every other position
/// is 0. A chromosome missing from the file reads as all zeros.
///
/// # Arguments
/// - reader: open bigWig file
/// - chrom: chromosome name
/// - start: first position (0-based)
/// - stop: one past the last position
/// - out: buffer of exactly `stop - start` values
pub fn read_bigwig_interval(
    reader: &mut BigWigReader,
    chrom: &str,
    start: u32,
    stop: u32,
    out: &mut [f32],
) -> Result<()> {
    if stop < start || out.len() != (stop - start) as usize {
        return Err(FeaturizeError::InvalidInterval(format!(
            "buffer of {} values for {}:{}-{}",
            out.len(),
            chrom,
            start,
            stop
        )));
    }
    out.fill(0.0);

    let Some(length) = chrom_length(reader, chrom) else {
        warn!("No data for chromosome {}!", chrom);
        return Ok(());
    };
    let end = stop.min(length);
    if start >= end {
        return Ok(());
    }

    let values = reader
        .get_interval(chrom, start, end)
        .map_err(|e| FeaturizeError::BigWig(format!("{}:{}-{}: {}", chrom, start, end, e)))?;

    for value in values {
        let value = value.map_err(|e| FeaturizeError::BigWig(e.to_string()))?;
        // clip record to requested region
        let s = value.start.max(start);
        let e = value.end.min(end);
        if s >= e {
            continue;
        }
        out[(s - start) as usize..(e - start) as usize].fill(value.value);
    }

    Ok(())
}
