use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    #[error("REST request failed: {0}")]
    Transport(String),

    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("response carries {got} results for {expected} submitted ids")]
    ResultCountMismatch { expected: usize, got: usize },

    #[error("batch {from}..{to} failed: {source}")]
    Batch {
        from: usize,
        to: usize,
        #[source]
        source: Box<ClientError>,
    },

    #[error("worker thread failed: {0}")]
    Worker(String),

    #[error("failed to read configuration file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON configuration: {0}")]
    ConfigParse(String),

    #[error("configuration lists no REST hosts")]
    NoHosts,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
