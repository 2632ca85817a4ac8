use clap::{Arg, ArgAction, Command, value_parser};

pub const FEATURIZE_CMD: &str = "featurize";

pub fn create_featurize_cli() -> Command {
    Command::new(FEATURIZE_CMD)
        .author("Databio")
        .about("Read several bigWig files over fixed-length windows centred on each interval.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("intervals")
                .required(true)
                .help("BED file of intervals (plain or gzipped, - for stdin)"),
        )
        .arg(
            Arg::new("signal")
                .long("signal")
                .short('s')
                .required(true)
                .action(ArgAction::Append)
                .help("bigWig file; repeat for several signals"),
        )
        .arg(
            Arg::new("length")
                .long("length")
                .short('l')
                .required(true)
                .value_parser(value_parser!(u32))
                .help("Window length. With --average, 0 averages over each interval itself"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .help("Output .npy file"),
        )
        .arg(
            Arg::new("average")
                .long("average")
                .action(ArgAction::SetTrue)
                .help("Output the mean signal of each window instead of per-base values"),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .help("Directory for cached results"),
        )
}
