use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::error::ClientError;
use crate::model::QueryResponse;
use crate::options::QueryOptions;
use crate::pagination::fetch_all;
use crate::transport::{RequestContext, Transport};

/// Maximum identifiers submitted in one REST call.
pub const BATCH_SIZE: usize = 200;

/// Worker threads used once the identifier list spans more than one batch.
pub const DEFAULT_NUM_THREADS: usize = 4;

/// Runs one query over an identifier list of any size.
///
/// Lists of at most [`BATCH_SIZE`] identifiers go straight to the
/// pagination engine on the calling thread. Longer lists are split into
/// consecutive batches fetched by a scoped worker pool; every batch runs
/// to completion before any merging happens, and per-batch responses are
/// concatenated in batch order so `response[i]` still corresponds to
/// `ids[i]`.
///
/// A failed batch fails the whole call: the lowest-indexed failure is
/// returned as [`ClientError::Batch`] carrying the offending id range.
/// Results of sibling batches are discarded rather than silently returned
/// as a partial response.
pub fn execute<T, X>(
    transport: &X,
    context: &RequestContext,
    ids: &[String],
    resource: &str,
    options: &QueryOptions,
) -> Result<QueryResponse<T>, ClientError>
where
    T: Send,
    X: Transport<T> + ?Sized,
{
    if ids.is_empty() {
        return Ok(QueryResponse::default());
    }
    if ids.len() <= BATCH_SIZE {
        return fetch_all(transport, context, ids, resource, options);
    }

    let batches: Vec<&[String]> = ids.chunks(BATCH_SIZE).collect();
    let num_threads = options
        .num_threads
        .unwrap_or(DEFAULT_NUM_THREADS)
        .clamp(1, batches.len());
    tracing::debug!(ids = ids.len(), batches = batches.len(), num_threads, resource, "dispatching batched query");

    let cursor = AtomicUsize::new(0);
    let mut outcomes: Vec<Option<Result<QueryResponse<T>, ClientError>>> = Vec::new();
    outcomes.resize_with(batches.len(), || None);

    let joined: Result<(), ClientError> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(num_threads);
        for _ in 0..num_threads {
            handles.push(scope.spawn(|| {
                let mut completed = Vec::new();
                loop {
                    let index = cursor.fetch_add(1, Ordering::SeqCst);
                    if index >= batches.len() {
                        break;
                    }
                    let outcome = fetch_all(transport, context, batches[index], resource, options);
                    completed.push((index, outcome));
                }
                completed
            }));
        }

        // Join every worker before touching any outcome, so a failure can
        // never race a still-running sibling.
        let mut panicked = false;
        for handle in handles {
            match handle.join() {
                Ok(completed) => {
                    for (index, outcome) in completed {
                        outcomes[index] = Some(outcome);
                    }
                }
                Err(_) => panicked = true,
            }
        }
        if panicked {
            return Err(ClientError::Worker("batch worker panicked".to_string()));
        }
        Ok(())
    });
    joined?;

    let mut merged = QueryResponse::default();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        let outcome = outcome
            .ok_or_else(|| ClientError::Worker(format!("batch {index} produced no outcome")))?;
        match outcome {
            Ok(partial) => {
                if merged.api_version.is_none() {
                    merged.api_version = partial.api_version.clone();
                }
                merged.response.extend(partial.response);
            }
            Err(source) => {
                let from = index * BATCH_SIZE;
                let to = (from + BATCH_SIZE).min(ids.len());
                tracing::warn!(from, to, error = %source, "batch failed, aborting call");
                return Err(ClientError::Batch {
                    from,
                    to,
                    source: Box::new(source),
                });
            }
        }
    }
    Ok(merged)
}
