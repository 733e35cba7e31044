// Ties the store, the scan and the report together
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use crate::common::{
    Named,
    ScanConfig,
    StorageClient,
};
use crate::report::Report;
use crate::scan::{
    ScanCoordinator,
    ScanOutcome,
};
use crate::store::StateStore;
use std::collections::HashSet;
use std::io::Write;
use tracing::{
    debug,
    info,
};

/// Performs one scan: loads earlier records, scans what's left, writes the
/// report to `out` and persists the updated records.
pub async fn run<C, W>(
    client: C,
    config: &ScanConfig,
    out:    &mut W,
) -> Result<ScanOutcome>
where
    C: StorageClient + Send + Sync + 'static,
    W: Write,
{
    debug!("run: {:?}", config);

    let store = StateStore::new(&config.state_dir);

    let mut failed    = store.load_failed();
    let mut succeeded = store.load_succeeded();

    let bucket_names = client.list_buckets()
        .await
        .context("Failed to list buckets")?;

    // Only the buckets in this listing are forgotten, records for anything
    // filtered out of it are carried through to the saved files.
    if config.refresh {
        info!("Refresh requested, ignoring previous records for {} buckets",
            bucket_names.len(),
        );

        let listed: HashSet<&str> = bucket_names
            .iter()
            .map(String::as_str)
            .collect();

        failed.retain(|r| !listed.contains(r.name()));
        succeeded.retain(|r| !listed.contains(r.name()));
    }

    let outcome = ScanCoordinator::new(client, config.concurrency)
        .with_timeout(config.timeout)
        .with_previous(failed, succeeded)
        .run(bucket_names)
        .await;

    Report::new(outcome.results.clone())
        .write_to(out, &config.unit)
        .context("Failed to write report")?;

    store.save(&outcome.failed, &outcome.succeeded);

    info!(
        "Scanned {} buckets, {} recorded as failed in total",
        outcome.results.len(),
        outcome.failed.len(),
    );

    Ok(outcome)
}
