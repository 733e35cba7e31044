// s3tally: Tallies object counts and sizes of AWS S3 buckets.
#![forbid(unsafe_code)]
use anyhow::{
    anyhow,
    Result,
};
use clap::ArgMatches;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod common;
mod report;
mod runner;
mod s3;
mod scan;
mod store;

use common::{
    ClientConfig,
    Region,
    ScanConfig,
    SizeUnit,
};

// Environment variable used to configure log filtering.
const LOG_ENV: &str = "S3TALLY_LOG";

// Warnings are what the user should see by default, these include buckets
// that couldn't be listed and state files that couldn't be read or written.
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Create a `ClientConfig` from the parsed `scan` arguments.
fn client_config(matches: &ArgMatches) -> ClientConfig {
    let mut region = Region::new();

    if let Some(name) = matches.get_one::<String>("REGION") {
        region = region.set_region(name);
    }

    ClientConfig {
        bucket_name: matches.get_one::<String>("BUCKET").cloned(),
        endpoint:    matches.get_one::<String>("ENDPOINT").cloned(),
        region:      region,
    }
}

/// Create a `ScanConfig` from the parsed `scan` arguments.
fn scan_config(matches: &ArgMatches) -> Result<ScanConfig> {
    let mut config = ScanConfig::default();

    if let Some(concurrency) = matches.get_one::<u16>("CONCURRENCY") {
        config.concurrency = usize::from(*concurrency);
    }

    if let Some(state_dir) = matches.get_one::<String>("STATE_DIR") {
        config.state_dir = PathBuf::from(state_dir);
    }

    if let Some(unit) = matches.get_one::<String>("UNIT") {
        // Clap already restricts the possible values, this shouldn't fail.
        config.unit = SizeUnit::from_str(unit).map_err(|e| anyhow!(e))?;
    }

    config.timeout = matches.get_one::<u64>("TIMEOUT")
        .map(|secs| Duration::from_secs(*secs));

    config.refresh = matches.get_flag("REFRESH");

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let matches = cli::parse_args();

    match matches.subcommand() {
        Some(("scan", matches)) => {
            let client_config = client_config(matches);
            let scan_config   = scan_config(matches)?;

            debug!("main: {:?}, {:?}", client_config, scan_config);

            let client = s3::Client::new(client_config).await;

            runner::run(client, &scan_config, &mut io::stdout().lock()).await?;
        },
        // Clap requires a subcommand, so we won't get here.
        _ => unreachable!("unknown subcommand"),
    }

    Ok(())
}
