use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeaturizeError {
    #[error("Invalid blur order {0}. Must be one of 0, 1, 2 or 3")]
    InvalidBlurOrder(i64),

    #[error("max_fraglen must be positive, got {0}")]
    NonPositiveMaxFraglen(i64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No intervals to extract")]
    EmptyIntervals,

    #[error("Interval {index} has width {found} but the first interval has width {expected}")]
    MismatchedWidths {
        index: usize,
        expected: u32,
        found: u32,
    },

    #[error("Got {found} mirror flags for {expected} intervals")]
    MirrorLengthMismatch { expected: usize, found: usize },

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("No data for chromosome {chrom}: {path:?} does not exist")]
    MissingData { chrom: String, path: PathBuf },

    #[error("Can't load matrix file {path:?}: {msg}")]
    MatrixLoad { path: PathBuf, msg: String },

    #[error("Matrix for {chrom} can't serve this request: {msg}")]
    MatrixShape { chrom: String, msg: String },

    #[error("BigWig error: {0}")]
    BigWig(String),

    #[error("FASTA error: {0}")]
    Fasta(String),

    #[error("npy error: {0}")]
    Npy(String),

    #[error("Corrupted cache file {path:?}: {msg}")]
    CorruptCache { path: PathBuf, msg: String },

    #[error(transparent)]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeaturizeError>;
