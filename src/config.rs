//! Configuration management for the IIIF text server

use serde::Deserialize;
use std::env;

use crate::image::ImageServerKind;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub image_server: ImageServerConfig,
    pub search: SearchConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL used for all generated IIIF ids
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory of ALTO and plain text files
    pub data_path: String,
    /// Number of parsed word streams kept in memory
    pub word_cache_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageServerConfig {
    pub url: Option<String>,
    pub name: ImageServerKind,
    /// Upper bound on served image size, forwarded as `max`
    pub max_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Words of context captured on each side of a match
    pub context_words: usize,
    pub max_results: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Token expected in `X-Access-Token`; admin routes are disabled without it
    pub access_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3333,
                base_url: "http://localhost:3333".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite:./iiif.db".to_string(),
                max_connections: 5,
            },
            storage: StorageConfig {
                data_path: "./data".to_string(),
                word_cache_size: 64,
            },
            image_server: ImageServerConfig {
                url: None,
                name: ImageServerKind::default(),
                max_size: None,
            },
            search: SearchConfig {
                context_words: 5,
                max_results: 100,
            },
            admin: AdminConfig { access_token: None },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
                base_url: env::var("BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.server.base_url),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var(
                    "DATABASE_MAX_CONNECTIONS",
                    defaults.database.max_connections,
                )?,
            },
            storage: StorageConfig {
                data_path: env::var("DATA_PATH").unwrap_or(defaults.storage.data_path),
                word_cache_size: parse_var("WORD_CACHE_SIZE", defaults.storage.word_cache_size)?,
            },
            image_server: ImageServerConfig {
                url: env::var("IMAGE_SERVER_URL").ok(),
                name: match env::var("IMAGE_SERVER_NAME")
                    .unwrap_or_else(|_| "sharp".to_string())
                    .as_str()
                {
                    "loris" => ImageServerKind::Loris,
                    _ => ImageServerKind::default(),
                },
                max_size: parse_optional_var("IMAGE_MAX_SIZE")?,
            },
            search: SearchConfig {
                context_words: parse_var("SEARCH_CONTEXT_WORDS", defaults.search.context_words)?,
                max_results: parse_var("SEARCH_MAX_RESULTS", defaults.search.max_results)?,
            },
            admin: AdminConfig {
                access_token: env::var("ADMIN_ACCESS_TOKEN").ok().filter(|t| !t.is_empty()),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidVar { name: String, value: String },
}

/// Parse a variable when set, falling back to `default` when unset
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    Ok(parse_optional_var(name)?.unwrap_or(default))
}

fn parse_optional_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
