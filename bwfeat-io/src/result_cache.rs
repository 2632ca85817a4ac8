//! On-disk cache of featurizer results.
//!
//! One file per request, named `<key>_<length>[_averaged]`, holding the tensor
//! as raw little-endian `f32` values in row-major order. The file carries no
//! header: the number of rows is recovered from its size.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::{debug, info};
use md5::{Digest, Md5};
use ndarray::Array4;

use bwfeat_core::models::Interval;
use bwfeat_core::{FeaturizeError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ResultCache { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    ///
    /// Digest of the signal files and interval coordinates of a request.
    ///
    pub fn key(signals: &[PathBuf], intervals: &[Interval]) -> String {
        let mut hasher = Md5::new();
        for signal in signals {
            hasher.update(signal.to_string_lossy().as_bytes());
            hasher.update(b"\n");
        }
        for interval in intervals {
            hasher.update(interval.as_string().as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn path_for(&self, key: &str, length: u32, average: bool) -> PathBuf {
        let suffix = if average { "_averaged" } else { "" };
        self.dir.join(format!("{}_{}{}", key, length, suffix))
    }

    ///
    /// Read a cached result back, or `None` when nothing is stored for `key`.
    ///
    /// # Arguments
    /// - key: request digest from [`ResultCache::key`]
    /// - length: window length the result was computed with
    /// - signals: number of signal files
    /// - average: whether the result holds per-signal averages
    pub fn load(&self, key: &str, length: u32, signals: usize, average: bool) -> Result<Option<Array4<f32>>> {
        let path = self.path_for(key, length, average);
        if !path.is_file() {
            return Ok(None);
        }

        let row_len = row_len(length, signals, average);
        if row_len == 0 {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let row_bytes = row_len * size_of::<f32>();
        if bytes.len() % row_bytes != 0 {
            return Err(FeaturizeError::CorruptCache {
                path,
                msg: format!("{} bytes is not a multiple of the {} byte row size", bytes.len(), row_bytes),
            });
        }

        let rows = bytes.len() / row_bytes;
        let mut values = vec![0f32; rows * row_len];
        LittleEndian::read_f32_into(&bytes, &mut values);

        let shape = if average {
            (rows, 1, 1, signals)
        } else {
            (rows, 1, signals, length as usize)
        };
        let data = Array4::from_shape_vec(shape, values).map_err(|e| FeaturizeError::CorruptCache {
            path: path.clone(),
            msg: e.to_string(),
        })?;

        info!("Loaded {} cached rows from {}", rows, path.display());
        Ok(Some(data))
    }

    pub fn store(&self, key: &str, length: u32, average: bool, data: &Array4<f32>) -> Result<PathBuf> {
        create_dir_all(&self.dir)?;
        let path = self.path_for(key, length, average);

        let mut writer = BufWriter::new(File::create(&path)?);
        for value in data.iter() {
            writer.write_f32::<LittleEndian>(*value)?;
        }
        writer.flush()?;

        debug!("Cached {:?} tensor to {}", data.dim(), path.display());
        Ok(path)
    }
}

fn row_len(length: u32, signals: usize, average: bool) -> usize {
    if average { signals } else { signals * length as usize }
}
