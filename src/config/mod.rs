use std::env;
use anyhow::{Result, Context};
use reqwest::Url;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Name of the variable holding the analysis endpoint URL.
pub const ENDPOINT_VAR: &str = "ANALYSIS_API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Request body cap for the hosting service. `None` leaves uploads
    /// unlimited; the form itself never checks sizes.
    pub max_file_size_mb: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            max_file_size_mb: Self::parse_optional_env_var("MAX_FILE_SIZE_MB"),
        };

        config.validate()?;

        if Self::endpoint_configured() {
            info!("Analysis endpoint configured via {}", ENDPOINT_VAR);
        } else {
            warn!("{} is not set; uploads will fail until it is provided", ENDPOINT_VAR);
        }

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    /// Port to bind, honouring a platform-provided `PORT` over `SERVER_PORT`.
    pub fn listen_port(&self) -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(self.server_port)
    }

    pub fn body_limit_bytes(&self) -> Option<usize> {
        self.max_file_size_mb
            .map(|mb| mb.saturating_mul(1024 * 1024))
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn parse_optional_env_var<T>(var_name: &str) -> Option<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let val = env::var(var_name).ok()?;
        match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Failed to parse {}: {} (leaving it unset)", var_name, e);
                None
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == Some(0) {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        Ok(())
    }

    /// Resolves the analysis endpoint. Read on every call so the value in
    /// effect at submission time is the one used.
    pub fn endpoint_url() -> AppResult<Url> {
        let raw = env::var(ENDPOINT_VAR)
            .map_err(|_| AppError::config(format!("{} is not set", ENDPOINT_VAR)))?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::config(format!("{} is empty", ENDPOINT_VAR)));
        }

        Url::parse(raw)
            .map_err(|e| AppError::config(format!("{} is not a valid URL: {}", ENDPOINT_VAR, e)))
    }

    pub fn endpoint_configured() -> bool {
        Self::endpoint_url().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_file_size_mb: Option<usize>) -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            max_file_size_mb,
        }
    }

    #[test]
    fn test_body_limit_is_derived_from_megabytes() {
        assert_eq!(config(Some(2)).body_limit_bytes(), Some(2 * 1024 * 1024));
    }

    #[test]
    fn test_body_limit_is_unset_by_default() {
        assert_eq!(config(None).body_limit_bytes(), None);
        assert!(config(None).validate().is_ok());
    }

    #[test]
    fn test_huge_body_limit_saturates() {
        assert_eq!(config(Some(usize::MAX)).body_limit_bytes(), Some(usize::MAX));
    }

    #[test]
    fn test_zero_file_size_is_rejected() {
        assert!(config(Some(0)).validate().is_err());
    }
}
