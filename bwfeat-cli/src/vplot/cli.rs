use clap::{Arg, Command, value_parser};

use crate::common::extractor_args;

pub const VPLOT_CMD: &str = "vplot";

pub fn create_vplot_cli() -> Command {
    Command::new(VPLOT_CMD)
        .author("Databio")
        .about("Extract (optionally blurred) fragment-length x position windows from per-chromosome Vplot matrices.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("prefix")
                .required(true)
                .help("Path prefix of the matrices; chromosome files are <prefix>.<chrom>"),
        )
        .args(extractor_args())
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with extractor options; flags below override it"),
        )
        .arg(
            Arg::new("blur-slope")
                .long("blur-slope")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Increase of the blur standard deviation per fragment length. Unset disables blurring"),
        )
        .arg(
            Arg::new("blur-intercept")
                .long("blur-intercept")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Blur standard deviation at fragment length 0"),
        )
        .arg(
            Arg::new("blur-order")
                .long("blur-order")
                .value_parser(value_parser!(i64))
                .help("Derivative order of the Gaussian kernel (0-3)"),
        )
        .arg(
            Arg::new("blur-precision")
                .long("blur-precision")
                .value_parser(value_parser!(i64))
                .help("Kernel radius in standard deviations"),
        )
        .arg(
            Arg::new("max-fraglen")
                .long("max-fraglen")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Number of fragment-length rows in the output"),
        )
}
