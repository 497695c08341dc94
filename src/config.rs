// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Origins allowed to make credentialed requests when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "https://fixnexus-aa0eb.web.app",
    "https://fixnexus-aa0eb.firebaseapp.com",
    "https://fixnexus.netlify.app",
];

const DEFAULT_DB_HOST: &str = "atlascluster.xgsegjb.mongodb.net";
const DEFAULT_DB_NAME: &str = "fixnexus";
const DEFAULT_DB_APP_NAME: &str = "AtlasCluster";

/// Deployment environment, selects the auth cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Which document store backend to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// MongoDB deployment reached through `uri`, using database `db_name`.
    Mongo { uri: String, db_name: String },
    /// Process-local store, contents are lost on restart.
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// HS256 signing key for session tokens (raw bytes)
    pub access_token_secret: Vec<u8>,
    pub environment: Environment,
    pub store: StoreConfig,
    /// Exact origins allowed for credentialed CORS requests
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 5000,
            access_token_secret: b"test_access_token_secret_32bytes".to_vec(),
            environment: Environment::Development,
            store: StoreConfig::Memory,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store = match env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreConfig::Memory,
            Ok("mongodb") | Err(_) => StoreConfig::Mongo {
                uri: mongo_uri_from_env()?,
                db_name: env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string()),
            },
            Ok(other) => return Err(ConfigError::Invalid("STORE_BACKEND", other.to_string())),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            access_token_secret: env::var("ACCESS_TOKEN_SECRET")
                .map_err(|_| ConfigError::Missing("ACCESS_TOKEN_SECRET"))?
                .into_bytes(),
            environment: Environment::from_node_env(env::var("NODE_ENV").ok().as_deref()),
            store,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect()),
        })
    }
}

/// Build the MongoDB connection string, preferring an explicit `MONGODB_URI`.
fn mongo_uri_from_env() -> Result<String, ConfigError> {
    if let Ok(uri) = env::var("MONGODB_URI") {
        return Ok(uri);
    }

    let user = env::var("DB_USER").map_err(|_| ConfigError::Missing("DB_USER"))?;
    let pass = env::var("DB_PASS").map_err(|_| ConfigError::Missing("DB_PASS"))?;
    let host = env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string());
    let app_name = env::var("DB_APP_NAME").unwrap_or_else(|_| DEFAULT_DB_APP_NAME.to_string());

    Ok(format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName={}",
        user, pass, host, app_name
    ))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
