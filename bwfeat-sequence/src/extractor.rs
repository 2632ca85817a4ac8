use std::path::{Path, PathBuf};

use log::debug;
use ndarray::{Array4, s};
use noodles::core::{Position, Region};
use noodles::fasta;

use bwfeat_core::mirror::reverse_complement;
use bwfeat_core::models::Interval;
use bwfeat_core::{Extractor, FeaturizeError, Result, validate_request};

use crate::onehot::{NUM_SEQ_CHARS, one_hot_encode_sequence};

///
/// One-hot encoded genome sequence, shape `(intervals, 1, 4, width)`.
///
/// Reads an indexed FASTA file; `<path>.fai` must exist. Mirroring an interval
/// takes its reverse complement.
///
#[derive(Debug, Clone)]
pub struct FastaExtractor {
    path: PathBuf,
}

impl FastaExtractor {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FastaExtractor { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".fai");
        PathBuf::from(path)
    }
}

fn region_for(interval: &Interval) -> Result<Region> {
    let start = Position::try_from(interval.start as usize + 1)
        .map_err(|e| FeaturizeError::InvalidInterval(format!("{}: {}", interval, e)))?;
    let end = Position::try_from(interval.stop as usize)
        .map_err(|e| FeaturizeError::InvalidInterval(format!("{}: {}", interval, e)))?;
    Ok(Region::new(interval.chrom.as_str(), start..=end))
}

impl Extractor for FastaExtractor {
    const MULTIPROCESSING_SAFE: bool = true;

    fn extract(&mut self, intervals: &[Interval], to_mirror: Option<&[bool]>) -> Result<Array4<f32>> {
        let width = validate_request(intervals, to_mirror)? as usize;

        let fai = self.index_path();
        if !fai.is_file() {
            return Err(FeaturizeError::Fasta(format!(
                "{} is not indexed: {} does not exist",
                self.path.display(),
                fai.display()
            )));
        }

        let mut reader = fasta::io::indexed_reader::Builder::default()
            .build_from_path(&self.path)
            .map_err(|e| FeaturizeError::Fasta(format!("Can't open {}: {}", self.path.display(), e)))?;

        let mut data = Array4::<f32>::zeros((intervals.len(), 1, NUM_SEQ_CHARS, width));
        for (index, interval) in intervals.iter().enumerate() {
            let region = region_for(interval)?;
            let record = reader
                .query(&region)
                .map_err(|e| FeaturizeError::Fasta(format!("Can't fetch {}: {}", interval, e)))?;

            let seq: &[u8] = record.sequence().as_ref();
            if seq.len() != width {
                return Err(FeaturizeError::Fasta(format!(
                    "{} runs past the end of {} ({} of {} bases)",
                    interval,
                    interval.chrom,
                    seq.len(),
                    width
                )));
            }
            one_hot_encode_sequence(seq, data.slice_mut(s![index, 0, .., ..]));
        }
        debug!("Encoded {} sequences of width {}", intervals.len(), width);

        if let Some(flags) = to_mirror {
            reverse_complement(&mut data, flags);
        }

        Ok(data)
    }
}
