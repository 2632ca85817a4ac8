use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use bwfeat_core::{FeaturizeError, Result};

use crate::matrix::ChromosomeMatrix;

///
/// Load-on-demand cache of per-chromosome matrices stored as `<prefix>.<chrom>`.
///
/// Entries are never evicted. A matrix is read from disk the first time its
/// chromosome is requested and shared read-only afterwards. `get` takes
/// `&mut self`: a cache belongs to one worker and is never shared between
/// parallel workers.
///
#[derive(Debug)]
pub struct ChromosomeMatrixCache {
    prefix: PathBuf,
    matrices: HashMap<String, Arc<ChromosomeMatrix>>,
    loads: usize,
}

impl ChromosomeMatrixCache {
    pub fn new<P: Into<PathBuf>>(prefix: P) -> Self {
        ChromosomeMatrixCache {
            prefix: prefix.into(),
            matrices: HashMap::new(),
            loads: 0,
        }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Backing file for a chromosome: the prefix with `.<chrom>` appended.
    pub fn matrix_path(&self, chrom: &str) -> PathBuf {
        let mut path = self.prefix.clone().into_os_string();
        path.push(".");
        path.push(chrom);
        PathBuf::from(path)
    }

    ///
    /// Get the matrix for a chromosome, loading it on first use.
    ///
    /// # Arguments
    /// - chrom: chromosome name as it appears in the intervals
    pub fn get(&mut self, chrom: &str) -> Result<Arc<ChromosomeMatrix>> {
        if let Some(matrix) = self.matrices.get(chrom) {
            return Ok(Arc::clone(matrix));
        }

        let path = self.matrix_path(chrom);
        if !path.is_file() {
            return Err(FeaturizeError::MissingData {
                chrom: chrom.to_string(),
                path,
            });
        }

        info!("Loading {}...", path.display());
        let matrix = Arc::new(ChromosomeMatrix::from_path(&path)?);
        debug!(
            "{}: {} x {} matrix with {} non-zero entries",
            chrom,
            matrix.rows(),
            matrix.cols(),
            matrix.nnz()
        );

        self.loads += 1;
        self.matrices.insert(chrom.to_string(), Arc::clone(&matrix));

        Ok(matrix)
    }

    /// Number of matrices read from disk so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.matrices.contains_key(chrom)
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}
