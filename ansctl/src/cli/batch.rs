//! Per-item execution for commands that take several ids
//!
//! Every id is attempted in the order given. A failing id produces one warning
//! line on the error stream and never aborts the rest of the batch.

use std::future::Future;

use ans_core::AnsError;

use crate::format::Output;

/// Fetch each id in order, keeping the records that could be retrieved.
///
/// `resource` names the record type in warnings, e.g. `"zone"` gives
/// `Error retrieving zone [<id>]: <message>`.
pub async fn fetch_each<T, F, Fut>(
    output: &mut Output<'_>,
    resource: &str,
    ids: &[String],
    fetch: F,
) -> Vec<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = ans_core::Result<T>>,
{
    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        match fetch(id.clone()).await {
            Ok(record) => records.push(record),
            Err(e) => report(output, &format!("retrieving {}", resource), id, &e),
        }
    }
    records
}

/// Apply a mutation to each id in order and return the ids it succeeded for.
///
/// `action` is the gerund phrase used in warnings, e.g. `"updating zone"`.
pub async fn apply_each<F, Fut>(
    output: &mut Output<'_>,
    action: &str,
    ids: &[String],
    apply: F,
) -> Vec<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = ans_core::Result<()>>,
{
    let mut done = Vec::with_capacity(ids.len());
    for id in ids {
        match apply(id.clone()).await {
            Ok(()) => done.push(id.clone()),
            Err(e) => report(output, action, id, &e),
        }
    }
    done
}

fn report(output: &mut Output<'_>, action: &str, id: &str, error: &AnsError) {
    tracing::debug!(id, error = ?error, "{} failed", action);
    output.warn(format!("Error {} [{}]: {}", action, id, error));
}
