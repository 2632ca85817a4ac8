mod bigwig;
mod common;
mod fasta;
mod featurize;
mod vplot;

use anyhow::Result;
use clap::Command;
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "bwfeat";
    pub const DEFAULT_BATCH_SIZE: usize = 1024;
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Extract fixed-width feature tensors for genomic intervals from Vplot matrices, bigWig tracks and FASTA files.")
        .subcommand_required(true)
        .subcommand(vplot::cli::create_vplot_cli())
        .subcommand(bigwig::cli::create_bigwig_cli())
        .subcommand(fasta::cli::create_fasta_cli())
        .subcommand(featurize::cli::create_featurize_cli())
}

fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // VPLOT
        //
        Some((vplot::cli::VPLOT_CMD, matches)) => {
            vplot::handlers::run_vplot(matches)?;
        }

        //
        // BIGWIG
        //
        Some((bigwig::cli::BIGWIG_CMD, matches)) => {
            bigwig::handlers::run_bigwig(matches)?;
        }

        //
        // FASTA
        //
        Some((fasta::cli::FASTA_CMD, matches)) => {
            fasta::handlers::run_fasta(matches)?;
        }

        //
        // MULTI-SIGNAL FEATURIZER
        //
        Some((featurize::cli::FEATURIZE_CMD, matches)) => {
            featurize::handlers::run_featurize(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
