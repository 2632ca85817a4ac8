use std::path::Path;

use ndarray::ArrayViewMut2;
use sprs::CsMat;

use bwfeat_core::models::Interval;
use bwfeat_core::utils::get_sniffing_reader;
use bwfeat_core::{FeaturizeError, Result};

///
/// Sparse fragment-length x position matrix for one chromosome.
/// Row `r` holds counts for fragments of length `r`, column `c` the genomic position.
///
#[derive(Debug, Clone)]
pub struct ChromosomeMatrix {
    inner: CsMat<f32>,
}

impl ChromosomeMatrix {
    ///
    /// Load a matrix stored in Matrix Market coordinate format (plain or gzipped).
    ///
    /// # Arguments
    /// - path: path to the per-chromosome matrix file
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = get_sniffing_reader(path)?;
        let triplets = sprs::io::read_matrix_market_from_bufread::<f32, usize, _>(&mut reader)
            .map_err(|e| FeaturizeError::MatrixLoad {
                path: path.to_owned(),
                msg: e.to_string(),
            })?;

        Ok(ChromosomeMatrix {
            inner: triplets.to_csr(),
        })
    }

    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    ///
    /// Make sure the matrix covers `max_fraglen` rows and the whole interval.
    ///
    pub fn check_window(&self, interval: &Interval, max_fraglen: usize) -> Result<()> {
        if self.rows() < max_fraglen {
            return Err(FeaturizeError::MatrixShape {
                chrom: interval.chrom.clone(),
                msg: format!(
                    "matrix has {} fragment length rows, max_fraglen is {}",
                    self.rows(),
                    max_fraglen
                ),
            });
        }
        if interval.stop as usize > self.cols() {
            return Err(FeaturizeError::MatrixShape {
                chrom: interval.chrom.clone(),
                msg: format!(
                    "interval {} extends past the {} positions of the matrix",
                    interval,
                    self.cols()
                ),
            });
        }
        Ok(())
    }

    ///
    /// Densify rows `[0, out.nrows())` and columns `[col_start, col_start + out.ncols())`
    /// into `out`. Columns outside the matrix (including negative ones) are zero.
    ///
    pub fn densify_into<T>(&self, col_start: i64, mut out: ArrayViewMut2<T>)
    where
        T: Copy + From<f32>,
    {
        out.fill(T::from(0.0));

        let col_end = col_start + out.ncols() as i64;
        let lo = col_start.max(0) as usize;
        let hi = col_end.clamp(0, self.cols() as i64) as usize;
        if lo >= hi {
            return;
        }

        let rows = out.nrows().min(self.rows());
        for row in 0..rows {
            let Some(vec) = self.inner.outer_view(row) else {
                continue;
            };
            let indices = vec.indices();
            let data = vec.data();

            let first = indices.partition_point(|&c| c < lo);
            for (&col, &value) in indices[first..].iter().zip(&data[first..]) {
                if col >= hi {
                    break;
                }
                out[[row, (col as i64 - col_start) as usize]] = T::from(value);
            }
        }
    }
}

impl From<CsMat<f32>> for ChromosomeMatrix {
    fn from(inner: CsMat<f32>) -> Self {
        ChromosomeMatrix {
            inner: inner.into_csr(),
        }
    }
}
