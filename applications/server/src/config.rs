/// Server configuration
use crate::error::{Result, ServerError};
use crate::services::MAX_TOKEN_EXPIRATION_HOURS;
use cadence_catalog::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built single-page app; served with an `index.html` fallback
    #[serde(default)]
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Probe the catalog before accepting requests
    #[serde(default = "default_verify_on_startup")]
    pub verify_on_startup: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_token_expiration_hours")]
    pub token_expiration_hours: u64,
}

impl ServerConfig {
    /// Load configuration from `config.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `config.toml` when given
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. CADENCE_AUTH__JWT_SECRET
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set CADENCE_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        let hours = self.auth.token_expiration_hours;
        if hours == 0 || hours > MAX_TOKEN_EXPIRATION_HOURS {
            return Err(ServerError::Config(format!(
                "auth.token_expiration_hours must be between 1 and {}, got {}",
                MAX_TOKEN_EXPIRATION_HOURS, hours
            )));
        }

        if self.catalog.max_results == 0 {
            return Err(ServerError::Config(
                "catalog.max_results must be at least 1".to_string(),
            ));
        }

        let url = self.catalog.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerError::Config(format!(
                "catalog.base_url must be an http(s) URL, got {:?}",
                self.catalog.base_url
            )));
        }

        Ok(())
    }

    /// Settings for the catalog client
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(self.catalog.base_url.clone())
            .with_timeout(Duration::from_secs(self.catalog.timeout_secs))
            .with_max_results(self.catalog.max_results)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        web_dir: None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        base_url: default_catalog_url(),
        timeout_secs: default_catalog_timeout(),
        max_results: default_max_results(),
        verify_on_startup: default_verify_on_startup(),
    }
}

fn default_catalog_url() -> String {
    cadence_catalog::DEFAULT_BASE_URL.to_string()
}

fn default_catalog_timeout() -> u64 {
    cadence_catalog::DEFAULT_TIMEOUT.as_secs()
}

fn default_max_results() -> usize {
    cadence_catalog::DEFAULT_MAX_RESULTS
}

fn default_verify_on_startup() -> bool {
    true
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/cadence.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        token_expiration_hours: default_token_expiration_hours(),
    }
}

fn default_token_expiration_hours() -> u64 {
    24
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            catalog: default_catalog(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn with_secret() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "s3cret".to_string();
        config
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.catalog.base_url, "https://saavn.dev/api");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.catalog.max_results, 10);
        assert!(config.server.web_dir.is_none());
    }

    #[test]
    fn validate_requires_secret() {
        assert!(ServerConfig::default().validate().is_err());
        assert!(with_secret().validate().is_ok());
    }

    #[test]
    fn validate_bounds_token_lifetime() {
        let mut config = with_secret();
        config.auth.token_expiration_hours = 0;
        assert!(config.validate().is_err());

        config.auth.token_expiration_hours = u64::MAX;
        assert!(config.validate().is_err());

        config.auth.token_expiration_hours = MAX_TOKEN_EXPIRATION_HOURS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_catalog_settings() {
        let mut config = with_secret();
        config.catalog.max_results = 0;
        assert!(config.validate().is_err());

        let mut config = with_secret();
        config.catalog.base_url = "ftp://catalog".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file_fills_missing_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 4000\n\n[auth]\njwt_secret = \"from-file\"\n\n[catalog]\nmax_results = 5"
        )
        .unwrap();

        let config = ServerConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.catalog.max_results, 5);
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.storage.database_url, "sqlite://./data/cadence.db");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ServerConfig::load_from(Some(Path::new("/nonexistent/cadence.toml")));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn catalog_config_carries_settings() {
        let mut config = with_secret();
        config.catalog.timeout_secs = 3;
        config.catalog.max_results = 4;

        let catalog = config.catalog_config();
        assert_eq!(catalog.timeout, Duration::from_secs(3));
        assert_eq!(catalog.max_results, 4);
    }
}
