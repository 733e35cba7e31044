// Command line interface parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use clap::{
    crate_description,
    crate_name,
    crate_version,
    value_parser,
    Arg,
    ArgAction,
    ArgMatches,
    Command,
};
use crate::common::DEFAULT_CONCURRENCY;
use tracing::debug;

// Default directory for the failed and success record files.
const DEFAULT_STATE_DIR: &str = ".";

// Default unit that sizes will be displayed in.
const DEFAULT_UNIT: &str = "human";

// This should match the string values in the SizeUnit FromStr impl.
const SIZE_UNITS: [&str; 4] = [
    "binary",
    "bytes",
    "decimal",
    "human",
];

// Create the scan subcommand
fn create_scan() -> Command {
    Command::new("scan")
        .about("Tally object counts and sizes for buckets not yet recorded")
        .arg(
            Arg::new("BUCKET")
                .help("Bucket to tally, if not provided all buckets are considered")
                .index(1)
                .value_name("BUCKET")
        )
        .arg(
            Arg::new("CONCURRENCY")
                .env("S3TALLY_CONCURRENCY")
                .hide_env_values(true)
                .long("concurrency")
                .short('c')
                .value_name("N")
                .help(format!(
                    "Number of buckets to list concurrently [default: {}]",
                    DEFAULT_CONCURRENCY,
                ))
                .value_parser(value_parser!(u16).range(1..))
        )
        .arg(
            Arg::new("ENDPOINT")
                .env("S3TALLY_ENDPOINT")
                .hide_env_values(true)
                .long("endpoint")
                .short('e')
                .value_name("URL")
                .help("Custom endpoint URL for S3 compatible storage")
        )
        .arg(
            Arg::new("REFRESH")
                .long("refresh")
                .help("Ignore previously recorded buckets and scan everything")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("REGION")
                .env("AWS_REGION")
                .hide_env_values(true)
                .long("region")
                .short('r')
                .value_name("REGION")
                .help("Set the AWS region to create the client in")
        )
        .arg(
            Arg::new("STATE_DIR")
                .env("S3TALLY_STATE_DIR")
                .hide_env_values(true)
                .long("state-dir")
                .short('s')
                .value_name("DIR")
                .help("Directory holding the failed and success bucket files")
                .default_value(DEFAULT_STATE_DIR)
        )
        .arg(
            Arg::new("TIMEOUT")
                .env("S3TALLY_TIMEOUT")
                .hide_env_values(true)
                .long("timeout")
                .short('t')
                .value_name("SECONDS")
                .help("Give up on a bucket after this many seconds")
                .value_parser(value_parser!(u64).range(1..))
        )
        .arg(
            Arg::new("UNIT")
                .env("S3TALLY_UNIT")
                .hide_env_values(true)
                .long("unit")
                .short('u')
                .value_name("UNIT")
                .help("Sets the unit to use for size display")
                .default_value(DEFAULT_UNIT)
                .value_parser(SIZE_UNITS)
        )
}

// Create clap app
pub fn create_app() -> Command {
    debug!("Creating CLI app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(create_scan())
}

pub fn parse_args() -> ArgMatches {
    debug!("Parsing command line arguments");

    create_app().get_matches()
}
