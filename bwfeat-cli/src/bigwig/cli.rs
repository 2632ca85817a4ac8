use clap::{Arg, Command, value_parser};

use crate::common::extractor_args;

pub const BIGWIG_CMD: &str = "bigwig";

pub fn create_bigwig_cli() -> Command {
    Command::new(BIGWIG_CMD)
        .author("Databio")
        .about("Extract per-base bigWig signal over intervals.")
        .arg_required_else_help(true)
        .arg(Arg::new("bigwig").required(true).help("bigWig file"))
        .args(extractor_args())
        .arg(
            Arg::new("local-norm-halfwidth")
                .long("local-norm-halfwidth")
                .value_parser(value_parser!(u32))
                .help("Z-score each interval against a window of this half-width around its centre"),
        )
}
