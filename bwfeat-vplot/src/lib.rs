//! # Vplot feature extraction
//!
//! A Vplot is a fragment-length x genomic-position count matrix built from
//! paired-end fragments. This crate reads one such matrix per chromosome from
//! `<prefix>.<chrom>` files (Matrix Market, optionally gzipped), caches them
//! on first use, and cuts fixed-width windows out of them for a list of
//! intervals.
//!
//! Windows can be blurred along the position axis with a Gaussian or one of
//! its first three derivatives. The kernel width grows linearly with fragment
//! length, so long fragments are smoothed more than short ones.
//!
//! ```no_run
//! use bwfeat_core::Extractor;
//! use bwfeat_core::models::Interval;
//! use bwfeat_vplot::{BlurConfig, VplotConfig, VplotExtractor};
//!
//! let config = VplotConfig {
//!     blur: BlurConfig { slope: Some(0.01), ..BlurConfig::default() },
//!     max_fraglen: 300,
//! };
//! let mut extractor = VplotExtractor::new("data/sample.vplot", config).unwrap();
//! let data = extractor
//!     .extract(&[Interval::new("chr1", 10_000, 10_200)], None)
//!     .unwrap();
//! assert_eq!(data.dim(), (1, 1, 300, 200));
//! ```
pub mod blur;
pub mod cache;
pub mod correlate;
pub mod extractor;
pub mod matrix;

// re-exports
pub use blur::{BlurConfig, BlurKernel, BlurOrder, build_blur_kernels};
pub use cache::ChromosomeMatrixCache;
pub use extractor::{VplotConfig, VplotExtractor};
pub use matrix::ChromosomeMatrix;
