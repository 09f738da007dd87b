use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Connection settings for a CellBase deployment: candidate REST hosts
/// (the client always talks to the first one), the API version segment
/// and the species used when a client does not name one explicitly.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfiguration {
    pub version: String,
    pub default_species: String,
    pub rest: RestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestConfig {
    pub hosts: Vec<String>,
}

impl ClientConfiguration {
    pub fn new(
        hosts: Vec<String>,
        version: impl Into<String>,
        default_species: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let configuration = Self {
            version: version.into(),
            default_species: default_species.into(),
            rest: RestConfig { hosts },
        };
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn load(path: Option<&str>) -> Result<Self, ClientError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("cellbase-client.json"),
        };
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ClientError> {
        let content =
            fs::read_to_string(path).map_err(|_| ClientError::ConfigRead(path.to_path_buf()))?;
        let configuration: Self = serde_json::from_str(&content)
            .map_err(|err| ClientError::ConfigParse(err.to_string()))?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// First configured host with any trailing slash removed, so URL
    /// segments can be joined with a single `/`.
    pub fn host(&self) -> &str {
        self.rest
            .hosts
            .first()
            .map(|host| host.trim_end_matches('/'))
            .unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.rest.hosts.is_empty() {
            return Err(ClientError::NoHosts);
        }
        if self.rest.hosts.iter().any(|host| host.trim().is_empty()) {
            return Err(ClientError::InvalidConfig("empty REST host".to_string()));
        }
        if self.version.trim().is_empty() {
            return Err(ClientError::InvalidConfig("empty version".to_string()));
        }
        if self.default_species.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "empty default species".to_string(),
            ));
        }
        Ok(())
    }
}
