// Pending set computation
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::{
    BucketNames,
    Named,
};
use std::collections::HashSet;
use tracing::debug;

fn names<R: Named>(records: &[R]) -> HashSet<&str> {
    records.iter().map(Named::name).collect()
}

/// Returns the buckets in `all` that appear in neither `failed` nor
/// `succeeded`.
///
/// The order of `all` is kept and duplicate names are dropped.
pub fn pending_buckets<F, S>(
    all:       &[String],
    failed:    &[F],
    succeeded: &[S],
) -> BucketNames
where
    F: Named,
    S: Named,
{
    let failed    = names(failed);
    let succeeded = names(succeeded);

    let mut seen    = HashSet::new();
    let mut pending = BucketNames::new();

    for name in all {
        let name = name.as_str();

        if failed.contains(name) || succeeded.contains(name) {
            debug!("pending_buckets: Skipping previously processed '{}'", name);

            continue;
        }

        if seen.insert(name) {
            pending.push(name.to_owned());
        }
    }

    pending
}
