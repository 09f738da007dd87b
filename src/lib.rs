//! REST client for CellBase genomic annotation services.
//!
//! Identifier lists of any size are split into batches of at most
//! [`scheduler::BATCH_SIZE`] ids, fetched concurrently, paginated past the
//! server's per-identifier page limit and merged back into one response
//! whose results line up positionally with the submitted identifiers.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod options;
pub mod pagination;
pub mod scheduler;
pub mod transport;

pub use client::{CellBaseClient, JsonResponse, RestClient};
pub use config::ClientConfiguration;
pub use error::ClientError;
pub use model::{QueryResponse, QueryResult};
pub use options::{DEFAULT_LIMIT, Query, QueryOptions};
pub use scheduler::{BATCH_SIZE, DEFAULT_NUM_THREADS};
pub use transport::{HttpTransport, RequestContext, Transport};
