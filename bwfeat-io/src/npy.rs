use std::fs::create_dir_all;
use std::path::Path;

use log::info;
use ndarray::Array4;
use ndarray_npy::{read_npy, write_npy};

use bwfeat_core::{FeaturizeError, Result};

///
/// Write an extracted tensor as a `.npy` file, creating parent directories.
///
/// # Arguments
/// - path: output file
/// - data: `(intervals, channels, sub_channels, width)` tensor
pub fn write_tensor_npy<P: AsRef<Path>>(path: P, data: &Array4<f32>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    write_npy(path, data).map_err(|e| FeaturizeError::Npy(e.to_string()))?;
    info!("Wrote {:?} tensor to {}", data.dim(), path.display());

    Ok(())
}

pub fn read_tensor_npy<P: AsRef<Path>>(path: P) -> Result<Array4<f32>> {
    read_npy(path.as_ref()).map_err(|e| FeaturizeError::Npy(e.to_string()))
}
