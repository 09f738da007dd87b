use serde::{Deserialize, Serialize};

/// One response from the REST service: an ordered sequence of results,
/// `response[i]` corresponding to the i-th submitted identifier (or to the
/// single filter group of an id-less call). Batching and pagination keep
/// that correspondence intact.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct QueryResponse<T> {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub response: Vec<QueryResult<T>>,
}

impl<T> Default for QueryResponse<T> {
    fn default() -> Self {
        Self {
            api_version: None,
            time: None,
            warning: None,
            error: None,
            response: Vec::new(),
        }
    }
}

impl<T> QueryResponse<T> {
    /// Convenience over the first result's items; most callers issue
    /// single-id lookups.
    pub fn first_result(&self) -> Option<&QueryResult<T>> {
        self.response.first()
    }

    pub fn num_results(&self) -> usize {
        self.response.iter().map(|result| result.result.len()).sum()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct QueryResult<T> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub db_time: Option<u64>,
    #[serde(default)]
    pub num_results: i64,
    #[serde(default)]
    pub num_total_results: i64,
    #[serde(default)]
    pub result: Vec<T>,
}

impl<T> QueryResult<T> {
    /// A page holding exactly `limit` items may have been cut off by the
    /// server; more data must be requested with an advanced skip cursor.
    pub fn is_truncated(&self, limit: usize) -> bool {
        self.result.len() == limit
    }
}
