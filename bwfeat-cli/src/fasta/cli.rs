use clap::{Arg, Command};

use crate::common::extractor_args;

pub const FASTA_CMD: &str = "fasta";

pub fn create_fasta_cli() -> Command {
    Command::new(FASTA_CMD)
        .author("Databio")
        .about("One-hot encode genome sequence over intervals. Mirrored intervals are reverse complemented.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("fasta")
                .required(true)
                .help("Indexed FASTA file (<fasta>.fai must exist)"),
        )
        .args(extractor_args())
}
