//! Runtime configuration read from the environment (after `.env` is loaded).

use std::env;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a port number, got '{value}'")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name} must be true or false, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },

    #[error("{name} must be a positive whole number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub admin_email: String,
    /// Argon2 PHC string; preferred over `admin_password`
    pub admin_password_hash: Option<String>,
    pub admin_password: Option<String>,
    pub user_id_salt: String,
    /// Empty means free-text cities
    pub cities: Vec<String>,
    /// Category catalogue; empty means the built-in list
    pub categories: Vec<String>,
    /// Hours a login token stays valid
    pub session_ttl_hours: u32,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = match get("EG_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { name: "EG_PORT", value })?,
            None => 8080,
        };

        let seed_demo = match get("EG_SEED_DEMO").map(|v| v.to_lowercase()) {
            None => true,
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
            Some(value) => return Err(ConfigError::InvalidFlag { name: "EG_SEED_DEMO", value }),
        };

        let session_ttl_hours = match get("EG_SESSION_TTL_HOURS") {
            Some(value) => match value.parse::<u32>() {
                Ok(hours) if hours > 0 => hours,
                _ => return Err(ConfigError::InvalidNumber { name: "EG_SESSION_TTL_HOURS", value }),
            },
            None => 24 * 7,
        };

        Ok(Self {
            bind_addr: get("EG_BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            admin_email: get("EG_ADMIN_EMAIL").unwrap_or_else(|| "admin@example.com".to_string()),
            admin_password_hash: get("EG_ADMIN_PASSWORD_HASH"),
            admin_password: get("EG_ADMIN_PASSWORD"),
            user_id_salt: get("EG_USER_ID_SALT").unwrap_or_else(|| "event-guide".to_string()),
            cities: comma_list(get("EG_CITIES")),
            categories: comma_list(get("EG_CATEGORIES")),
            session_ttl_hours,
            seed_demo,
        })
    }
}

fn comma_list(raw: Option<String>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
