use serde_json::Value;

use crate::config::ClientConfiguration;
use crate::error::ClientError;
use crate::model::QueryResponse;
use crate::options::{Query, QueryOptions};
use crate::pagination::fetch_all;
use crate::scheduler::execute;
use crate::transport::{HttpTransport, RequestContext, Transport};

/// Query dispatcher for one category/subcategory of the REST API.
///
/// `get` accepts identifier lists of any size and batches them behind the
/// scenes; `count` and `first` are filter-style calls that always address
/// a single logical unit and never batch. The default page `limit` is
/// injected downstream only when the caller left it unset.
pub struct RestClient<X> {
    context: RequestContext,
    transport: X,
}

impl<X> RestClient<X> {
    pub fn new(
        configuration: &ClientConfiguration,
        species: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        transport: X,
    ) -> Self {
        Self {
            context: RequestContext {
                host: configuration.host().to_string(),
                version: configuration.version.clone(),
                species: species.into(),
                category: category.into(),
                subcategory: subcategory.into(),
            },
            transport,
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Looks up records by id; `response[i]` corresponds to `ids[i]`.
    pub fn get<T>(
        &self,
        ids: &[String],
        options: &QueryOptions,
    ) -> Result<QueryResponse<T>, ClientError>
    where
        T: Send,
        X: Transport<T>,
    {
        execute(&self.transport, &self.context, ids, "info", options)
    }

    /// Counts records matching a filter; the filter terms travel as query
    /// parameters.
    pub fn count(&self, query: &Query) -> Result<QueryResponse<u64>, ClientError>
    where
        X: Transport<u64>,
    {
        let mut options = QueryOptions::new();
        options.apply_query(query);
        fetch_all(&self.transport, &self.context, &[], "count", &options)
    }

    /// Fetches the first record of the subcategory; handy for probing the
    /// schema or the connection.
    pub fn first<T>(&self) -> Result<QueryResponse<T>, ClientError>
    where
        X: Transport<T>,
    {
        fetch_all(&self.transport, &self.context, &[], "first", &QueryOptions::new())
    }
}

/// Hands out category-bound clients for the common CellBase resources,
/// all sharing one HTTP connection pool and one resolved configuration.
pub struct CellBaseClient {
    configuration: ClientConfiguration,
    species: String,
    transport: HttpTransport,
}

impl CellBaseClient {
    pub fn new(configuration: ClientConfiguration) -> Result<Self, ClientError> {
        let species = configuration.default_species.clone();
        Self::with_species(configuration, species)
    }

    pub fn with_species(
        configuration: ClientConfiguration,
        species: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            transport: HttpTransport::new()?,
            species: species.into(),
            configuration,
        })
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn gene(&self) -> RestClient<HttpTransport> {
        self.client("feature", "gene")
    }

    pub fn transcript(&self) -> RestClient<HttpTransport> {
        self.client("feature", "transcript")
    }

    pub fn protein(&self) -> RestClient<HttpTransport> {
        self.client("feature", "protein")
    }

    pub fn variation(&self) -> RestClient<HttpTransport> {
        self.client("feature", "variation")
    }

    pub fn region(&self) -> RestClient<HttpTransport> {
        self.client("genomic", "region")
    }

    fn client(&self, category: &str, subcategory: &str) -> RestClient<HttpTransport> {
        RestClient::new(
            &self.configuration,
            self.species.clone(),
            category,
            subcategory,
            self.transport.clone(),
        )
    }
}

/// Untyped convenience alias; facade clients decode items as raw JSON.
pub type JsonResponse = QueryResponse<Value>;
