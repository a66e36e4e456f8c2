use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which mock store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Zero means retry until the database comes up.
    pub database_connect_retries: u32,
    pub host: String,
    pub port: u16,
    /// Routing segment removed from inbound paths before lookup, e.g. `/mockservice`.
    pub mock_route_prefix: String,
    /// Public base URL of the mock endpoints, echoed in list responses.
    pub domain_mock_path: String,
    pub mock_pdf_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Postgres,
            database_url: None,
            database_max_connections: 10,
            database_connect_retries: 0,
            host: "0.0.0.0".to_string(),
            port: 3000,
            mock_route_prefix: "/mockservice".to_string(),
            domain_mock_path: String::new(),
            mock_pdf_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.store_backend,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let mock_route_prefix =
            env::var("MOCK_ROUTE_PREFIX").unwrap_or(defaults.mock_route_prefix);
        validate_prefix(&mock_route_prefix)?;

        Ok(Self {
            store_backend,
            database_url,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(defaults.database_max_connections),
            database_connect_retries: env::var("DATABASE_CONNECT_RETRIES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .unwrap_or(defaults.database_connect_retries),
            host: env::var("BACKEND_HOST").unwrap_or(defaults.host),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(defaults.port),
            mock_route_prefix,
            domain_mock_path: env::var("DOMAIN_MOCK_PATH").unwrap_or_default(),
            mock_pdf_path: env::var("MOCK_PDF_PATH").ok().map(PathBuf::from),
        })
    }
}

/// The prefix is a literal path mounted under `/v1` next to the management routes.
fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    let clashes_with_management =
        prefix == "/mocks" || prefix == "/mock" || prefix.starts_with("/mock/");
    let valid = prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains(['{', '}', '*', '?'])
        && !clashes_with_management;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: "MOCK_ROUTE_PREFIX",
            value: prefix.to_string(),
        })
    }
}
