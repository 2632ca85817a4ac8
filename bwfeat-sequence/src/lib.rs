//! # DNA sequence features
//!
//! One-hot encoding of genome sequence read from an indexed FASTA file.
pub mod extractor;
pub mod onehot;

// re-exports
pub use extractor::FastaExtractor;
pub use onehot::{NUM_SEQ_CHARS, base_channel, one_hot_encode_sequence};
