//! # BigWig signal features
//!
//! Reading per-base signal from bigWig files over genomic intervals.
//!
//! - [`BigwigExtractor`] turns one bigWig into a `(intervals, 1, 1, width)`
//!   tensor, optionally z-scored against a local window.
//! - [`featurize`] and [`average`] read several bigWigs over windows centred
//!   on each interval, with an optional on-disk result cache.
//! - [`BigwigBinaryExtractor`] is the extractor form of [`featurize`].
pub mod bigwig;
pub mod extractor;
pub mod featurize;
pub mod norm;

#[cfg(test)]
mod testing;

// re-exports
pub use bigwig::{BigWigReader, open_bigwig, read_bigwig_interval};
pub use extractor::BigwigExtractor;
pub use featurize::{BigwigBinaryExtractor, FeaturizeOptions, average, featurize};
