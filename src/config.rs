use std::env;
use crate::errors::{AppError, AppResult};

const MEMORY_URL_PREFIX: &str = "memory://";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Origins allowed by CORS; empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .map_err(|err| AppError::Config(format!("Invalid PORT: {}", err)))?;
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;
        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .map_err(|err| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", err)))?;
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(AppConfig {
            host,
            port,
            database_url,
            database_max_connections,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_URL_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_fill_in_host_and_port() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/employees")]).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.database_max_connections, 5);
        assert!(!config.uses_memory_store());
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn cors_origins_are_comma_separated() {
        let config = config_from(&[
            ("DATABASE_URL", "memory://"),
            ("CORS_ALLOWED_ORIGINS", " http://localhost:3000, ,https://hr.example.com "),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            ["http://localhost:3000", "https://hr.example.com"]
        );
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(config_from(&[]), Err(AppError::Config(_))));
        assert!(matches!(config_from(&[("DATABASE_URL", " ")]), Err(AppError::Config(_))));
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let result = config_from(&[("DATABASE_URL", "memory://"), ("PORT", "eighty")]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn memory_scheme_selects_in_memory_store() {
        let config = config_from(&[("DATABASE_URL", "memory://"), ("PORT", "8081")]).unwrap();
        assert!(config.uses_memory_store());
        assert_eq!(config.port, 8081);
    }
}
