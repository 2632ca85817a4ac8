//! # Output for bwfeat
//!
//! Writing extracted tensors as `.npy` files and caching featurizer results
//! on disk between runs.
pub mod npy;
pub mod result_cache;

// re-exports
pub use npy::{read_tensor_npy, write_tensor_npy};
pub use result_cache::ResultCache;
