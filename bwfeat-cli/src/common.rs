use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, value_parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use ndarray::{Array4, ArrayView4, Axis, concatenate};

use bwfeat_core::{Extractor, validate_request};
use bwfeat_core::models::{Interval, IntervalSet};
use bwfeat_io::write_tensor_npy;

use crate::consts::DEFAULT_BATCH_SIZE;

/// Arguments shared by the extractor subcommands.
pub fn extractor_args() -> Vec<Arg> {
    vec![
        Arg::new("intervals")
            .required(true)
            .help("BED file of equal-width intervals (plain or gzipped, - for stdin)"),
        Arg::new("output")
            .long("output")
            .short('o')
            .required(true)
            .help("Output .npy file"),
        Arg::new("mirror-minus")
            .long("mirror-minus")
            .action(ArgAction::SetTrue)
            .help("Mirror intervals on the minus strand (BED column 6)"),
        Arg::new("batch-size")
            .long("batch-size")
            .value_parser(value_parser!(usize))
            .help("Number of intervals extracted at once"),
    ]
}

pub fn load_intervals(matches: &ArgMatches) -> Result<IntervalSet> {
    let path = matches
        .get_one::<String>("intervals")
        .expect("A path to an interval file is required.");

    let intervals = IntervalSet::try_from(path.as_str())
        .with_context(|| format!("Failed to read intervals from {}", path))?;
    info!("Read {} intervals from {}", intervals.len(), path);

    Ok(intervals)
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );
    Ok(bar)
}

///
/// Run an extractor over `intervals` in batches and stack the results.
/// The whole request is validated before the first batch is extracted.
///
pub fn extract_batched<E: Extractor>(
    extractor: &mut E,
    intervals: &[Interval],
    to_mirror: Option<&[bool]>,
    batch_size: usize,
) -> Result<Array4<f32>> {
    validate_request(intervals, to_mirror)?;

    let batch_size = batch_size.max(1);
    let bar = progress_bar(intervals.len())?;

    let mut batches: Vec<Array4<f32>> = Vec::with_capacity(intervals.len().div_ceil(batch_size));
    for (index, chunk) in intervals.chunks(batch_size).enumerate() {
        let offset = index * batch_size;
        let flags = to_mirror.map(|flags| &flags[offset..offset + chunk.len()]);
        batches.push(extractor.extract(chunk, flags)?);
        bar.inc(chunk.len() as u64);
    }
    bar.finish_with_message("done");

    let views: Vec<ArrayView4<f32>> = batches.iter().map(|b| b.view()).collect();
    let data = concatenate(Axis(0), &views).context("Failed to stack extracted batches")?;

    Ok(data)
}

///
/// Shared tail of the extractor subcommands: read intervals, extract, write.
///
pub fn run_extractor<E: Extractor>(extractor: &mut E, matches: &ArgMatches) -> Result<()> {
    let intervals = load_intervals(matches)?;

    let flags = matches
        .get_flag("mirror-minus")
        .then(|| intervals.minus_strand_flags());
    let batch_size = matches
        .get_one::<usize>("batch-size")
        .copied()
        .unwrap_or(DEFAULT_BATCH_SIZE);

    let data = extract_batched(extractor, &intervals.intervals, flags.as_deref(), batch_size)?;

    let output = matches
        .get_one::<String>("output")
        .expect("An output path is required.");
    write_tensor_npy(output, &data).with_context(|| format!("Failed to write {}", output))?;

    Ok(())
}
