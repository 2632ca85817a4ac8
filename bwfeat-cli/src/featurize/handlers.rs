use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use bwfeat_io::write_tensor_npy;
use bwfeat_signal::{FeaturizeOptions, featurize};

use crate::common::load_intervals;

pub fn run_featurize(matches: &ArgMatches) -> Result<()> {
    let signals: Vec<PathBuf> = matches
        .get_many::<String>("signal")
        .expect("At least one bigWig file is required.")
        .map(PathBuf::from)
        .collect();
    let length = *matches
        .get_one::<u32>("length")
        .expect("A window length is required.");
    let output = matches
        .get_one::<String>("output")
        .expect("An output path is required.");

    let options = FeaturizeOptions {
        average: matches.get_flag("average"),
        cache_dir: matches.get_one::<String>("cache").map(PathBuf::from),
    };

    let intervals = load_intervals(matches)?;
    let data = featurize(&signals, length, &intervals.intervals, &options)?;

    if data.dim().0 < intervals.len() {
        info!(
            "{} intervals were left out because their windows overhang the chromosome start",
            intervals.len() - data.dim().0
        );
    }

    write_tensor_npy(output, &data).with_context(|| format!("Failed to write {}", output))?;

    Ok(())
}
