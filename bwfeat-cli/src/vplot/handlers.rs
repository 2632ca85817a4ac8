use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use bwfeat_core::ExtractorConfig;
use bwfeat_vplot::{VplotConfig, VplotExtractor};

use crate::common::run_extractor;

///
/// Build the extractor configuration from an optional TOML file and the
/// command line flags, flags taking precedence.
///
pub fn extractor_config(matches: &ArgMatches) -> Result<ExtractorConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ExtractorConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file {}", path))?,
        None => ExtractorConfig::default(),
    };

    if let Some(slope) = matches.get_one::<f64>("blur-slope") {
        config.blur_slope = Some(*slope);
    }
    if let Some(intercept) = matches.get_one::<f64>("blur-intercept") {
        config.blur_intercept = *intercept;
    }
    if let Some(order) = matches.get_one::<i64>("blur-order") {
        config.blur_order = *order;
    }
    if let Some(precision) = matches.get_one::<i64>("blur-precision") {
        config.blur_precision = *precision;
    }
    if let Some(max_fraglen) = matches.get_one::<i64>("max-fraglen") {
        config.max_fraglen = *max_fraglen;
    }

    Ok(config)
}

pub fn run_vplot(matches: &ArgMatches) -> Result<()> {
    let prefix = matches
        .get_one::<String>("prefix")
        .expect("A matrix path prefix is required.");

    let config = extractor_config(matches)?;
    let vplot_config = VplotConfig::try_from(&config)?;
    info!(
        "Extracting {} fragment-length rows, blur {}",
        vplot_config.max_fraglen,
        match vplot_config.blur.slope {
            Some(slope) => format!("slope {} intercept {}", slope, vplot_config.blur.intercept),
            None => "disabled".to_string(),
        }
    );

    let mut extractor = VplotExtractor::new(prefix, vplot_config)?;
    run_extractor(&mut extractor, matches)?;

    info!("Loaded {} chromosome matrices", extractor.cache().loads());

    Ok(())
}
