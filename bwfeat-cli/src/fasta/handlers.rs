use anyhow::Result;
use clap::ArgMatches;

use bwfeat_sequence::FastaExtractor;

use crate::common::run_extractor;

pub fn run_fasta(matches: &ArgMatches) -> Result<()> {
    let fasta = matches
        .get_one::<String>("fasta")
        .expect("A path to a FASTA file is required.");

    let mut extractor = FastaExtractor::new(fasta);
    run_extractor(&mut extractor, matches)
}
