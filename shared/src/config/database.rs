//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{parsed_or, required, ConfigError};

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(skip_serializing)]
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout: u64,

    /// Upper bound for a single store call in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            connect_timeout: 30,
            query_timeout: default_query_timeout(),
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(lookup, "DATABASE_URL")?;
        Ok(Self {
            url,
            max_connections: parsed_or(lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            connect_timeout: parsed_or(lookup, "DATABASE_CONNECT_TIMEOUT", 30)?,
            query_timeout: parsed_or(lookup, "DATABASE_QUERY_TIMEOUT", default_query_timeout())?,
        })
    }
}

fn default_query_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::new("mysql://localhost/openlogic").with_max_connections(20);
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.connect_timeout, 30);
        assert_eq!(config.query_timeout, 5);
    }
}
