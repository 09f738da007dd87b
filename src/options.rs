use std::collections::BTreeMap;

/// Maximum items the server returns per identifier per call. Injected as
/// `limit` when the caller did not set one; a page holding exactly this
/// many items is considered truncated.
pub const DEFAULT_LIMIT: usize = 1000;

/// Per-call query options. The recognized keys are typed; anything else
/// lands in `extra` and is forwarded verbatim as a query parameter.
/// An option set by the caller is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub num_threads: Option<usize>,
    pub extra: BTreeMap<String, String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Fills in `limit` only when the caller left it unset.
    pub fn ensure_limit(&mut self) -> usize {
        *self.limit.get_or_insert(DEFAULT_LIMIT)
    }

    /// Folds filter fields into the pass-through parameters. Filter values
    /// win over a colliding extra, matching how the original client merges
    /// a query into its options before a count call.
    pub fn apply_query(&mut self, query: &Query) {
        for (key, value) in &query.0 {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Everything that goes on the URL, in a stable order. `num_threads`
    /// is client-side only and never reaches the server.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.extra.len() + 4);
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(include) = &self.include {
            params.push(("include".to_string(), include.clone()));
        }
        if let Some(exclude) = &self.exclude {
            params.push(("exclude".to_string(), exclude.clone()));
        }
        for (key, value) in &self.extra {
            params.push((key.clone(), value.clone()));
        }
        params
    }
}

/// Ordered filter terms for filter-style calls such as `count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
