use anyhow::Result;
use clap::ArgMatches;

use bwfeat_signal::BigwigExtractor;

use crate::common::run_extractor;

pub fn run_bigwig(matches: &ArgMatches) -> Result<()> {
    let bigwig = matches
        .get_one::<String>("bigwig")
        .expect("A path to a bigWig file is required.");
    let halfwidth = matches.get_one::<u32>("local-norm-halfwidth").copied();

    let mut extractor = BigwigExtractor::new(bigwig, halfwidth);
    run_extractor(&mut extractor, matches)
}
