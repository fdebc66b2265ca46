use std::path::PathBuf;

use crate::auth::session::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Session token verification settings.
    pub session: SessionConfig,
    /// Where uploads and error reports live.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            session: SessionConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Files live under a directory on the broker host.
    Local { broker_files: PathBuf },
    /// Files live in an S3 bucket; clients get temporary credentials.
    Remote(RemoteStorageConfig),
}

/// Bucket and credentials handed to clients in remote mode.
#[derive(Debug, Clone)]
pub struct RemoteStorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                 | Required          | Default     |
    /// |-------------------------|-------------------|-------------|
    /// | `USE_AWS`               | no                | `false`     |
    /// | `BROKER_FILES`          | no                | `./files`   |
    /// | `AWS_BUCKET`            | when `USE_AWS`    | --          |
    /// | `AWS_REGION`            | no                | `us-east-1` |
    /// | `AWS_ACCESS_KEY_ID`     | when `USE_AWS`    | --          |
    /// | `AWS_SECRET_ACCESS_KEY` | when `USE_AWS`    | --          |
    /// | `AWS_SESSION_TOKEN`     | when `USE_AWS`    | --          |
    ///
    /// # Panics
    ///
    /// Panics if `USE_AWS` is not a boolean or a required AWS variable is
    /// missing.
    pub fn from_env() -> Self {
        let use_aws: bool = std::env::var("USE_AWS")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("USE_AWS must be true or false");

        if !use_aws {
            let broker_files = std::env::var("BROKER_FILES").unwrap_or_else(|_| "./files".into());
            return Self::Local {
                broker_files: PathBuf::from(broker_files),
            };
        }

        let required = |name: &str| {
            std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set when USE_AWS=true"))
        };

        Self::Remote(RemoteStorageConfig {
            bucket: required("AWS_BUCKET"),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into()),
            access_key_id: required("AWS_ACCESS_KEY_ID"),
            secret_access_key: required("AWS_SECRET_ACCESS_KEY"),
            session_token: required("AWS_SESSION_TOKEN"),
        })
    }
}
