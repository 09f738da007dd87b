use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::model::QueryResponse;
use crate::options::QueryOptions;

/// Everything needed to address one REST resource, resolved once per
/// client instead of being read from shared global state at call time.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub host: String,
    pub version: String,
    pub species: String,
    pub category: String,
    pub subcategory: String,
}

/// One HTTP GET, one decoded body. Implementations are stateless with
/// respect to batching and pagination; they never retry.
pub trait Transport<T>: Send + Sync {
    fn call(
        &self,
        context: &RequestContext,
        ids: &[String],
        resource: &str,
        options: &QueryOptions,
    ) -> Result<QueryResponse<T>, ClientError>;
}

/// `{host}/webservices/rest/{version}/{species}/{category}/{subcategory}[/{ids}]/{resource}`.
/// The id segment is omitted for filter-style calls.
pub fn build_url(context: &RequestContext, ids: &[String], resource: &str) -> String {
    let mut url = format!(
        "{}/webservices/rest/{}/{}/{}/{}",
        context.host, context.version, context.species, context.category, context.subcategory
    );
    if !ids.is_empty() {
        url.push('/');
        url.push_str(&ids.join(","));
    }
    url.push('/');
    url.push_str(resource);
    url
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("cellbase-client/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| ClientError::Transport(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl<T: DeserializeOwned> Transport<T> for HttpTransport {
    fn call(
        &self,
        context: &RequestContext,
        ids: &[String],
        resource: &str,
        options: &QueryOptions,
    ) -> Result<QueryResponse<T>, ClientError> {
        let url = build_url(context, ids, resource);
        tracing::debug!(%url, "calling REST endpoint");

        let response = self
            .client
            .get(&url)
            .query(&options.to_query_params())
            .send()
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "REST request failed".to_string());
            return Err(ClientError::Status { status, message });
        }

        response
            .json()
            .map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RequestContext {
        RequestContext {
            host: "http://localhost:8080/cellbase".to_string(),
            version: "v4".to_string(),
            species: "hsapiens".to_string(),
            category: "feature".to_string(),
            subcategory: "gene".to_string(),
        }
    }

    #[test]
    fn url_joins_ids_with_commas() {
        let ids = vec!["BRCA2".to_string(), "TP53".to_string()];
        assert_eq!(
            build_url(&context(), &ids, "info"),
            "http://localhost:8080/cellbase/webservices/rest/v4/hsapiens/feature/gene/BRCA2,TP53/info"
        );
    }

    #[test]
    fn url_omits_empty_id_segment() {
        assert_eq!(
            build_url(&context(), &[], "count"),
            "http://localhost:8080/cellbase/webservices/rest/v4/hsapiens/feature/gene/count"
        );
    }
}
