use crate::error::ClientError;
use crate::model::QueryResponse;
use crate::options::QueryOptions;
use crate::transport::{RequestContext, Transport};

/// Fetches every page for one batch of identifiers, or for the single
/// logical group of a filter-style call when `ids` is empty.
///
/// The server truncates each identifier's result at `limit` items per
/// call. After every call the frontier is rebuilt: the slots whose page
/// came back exactly `limit` long, keyed by their position in the
/// ORIGINAL batch. Follow-up calls carry only the frontier's identifiers
/// with the skip cursor advanced by `limit`, and each returned page is
/// appended to the accumulator at its mapped slot. A round with an empty
/// frontier ends the loop; a trailing page shorter than `limit`
/// (including an empty one) ends pagination for its key.
pub fn fetch_all<T, X>(
    transport: &X,
    context: &RequestContext,
    ids: &[String],
    resource: &str,
    options: &QueryOptions,
) -> Result<QueryResponse<T>, ClientError>
where
    X: Transport<T> + ?Sized,
{
    let mut options = options.clone();
    let limit = options.ensure_limit();

    let mut merged = transport.call(context, ids, resource, &options)?;
    let expected = if ids.is_empty() { 1 } else { ids.len() };
    if merged.response.len() != expected {
        return Err(ClientError::ResultCountMismatch {
            expected,
            got: merged.response.len(),
        });
    }

    let mut frontier: Vec<usize> = merged
        .response
        .iter()
        .enumerate()
        .filter(|(_, result)| result.is_truncated(limit))
        .map(|(slot, _)| slot)
        .collect();

    let mut skip = options.skip.unwrap_or(0);
    while !frontier.is_empty() {
        skip += limit;
        options.skip = Some(skip);

        let follow_up: Vec<String> = if ids.is_empty() {
            Vec::new()
        } else {
            frontier.iter().map(|&slot| ids[slot].clone()).collect()
        };
        tracing::debug!(pending = frontier.len(), skip, resource, "fetching follow-up page");

        let page = transport.call(context, &follow_up, resource, &options)?;
        if page.response.len() != frontier.len() {
            return Err(ClientError::ResultCountMismatch {
                expected: frontier.len(),
                got: page.response.len(),
            });
        }

        let mut next_frontier = Vec::new();
        for (position, result) in page.response.into_iter().enumerate() {
            let slot = frontier[position];
            let truncated = result.is_truncated(limit);
            let accumulator = &mut merged.response[slot];
            accumulator.result.extend(result.result);
            accumulator.num_results = accumulator.result.len() as i64;
            if truncated {
                next_frontier.push(slot);
            }
        }
        frontier = next_frontier;
    }

    Ok(merged)
}
