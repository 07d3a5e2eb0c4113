pub use crate::utils::database;
use crate::modules::order::status::StatusPolicy;
use async_trait::async_trait;
use chrono::Duration;
use std::env;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
}

#[derive(Clone)]
pub struct OrderContext {
    pub status_policy: StatusPolicy,
}

#[derive(Clone)]
pub struct AuthContext {
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub orders: OrderContext,
    pub auth: AuthContext,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct OrderConfig {
    pub status_policy: StatusPolicy,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub orders: OrderConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "{} not set", name),
            Self::Invalid(name, value) => write!(f, "Invalid {}: '{}'", name, value),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 4u32)?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let environment = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let port = parse_or(&lookup, "PORT", 8000u16)?;
        let url = lookup("URL").unwrap_or_else(|| format!("http://{}:{}", host, port));
        let status_policy = parse_or(&lookup, "ORDER_STATUS_POLICY", StatusPolicy::Strict)?;
        let access_token_ttl_minutes = parse_or(&lookup, "ACCESS_TOKEN_TTL_MINUTES", 60i64)?;
        let refresh_token_ttl_days = parse_or(&lookup, "REFRESH_TOKEN_TTL_DAYS", 30i64)?;

        Ok(Self {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            orders: OrderConfig { status_policy },
            auth: AuthConfig {
                access_token_ttl_minutes,
                refresh_token_ttl_days,
            },
        })
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, database::Error>;
}

impl Config {
    fn into_context(self, db_conn: database::DatabaseConnection) -> Context {
        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            db_conn,
            orders: OrderContext {
                status_policy: self.orders.status_policy,
            },
            auth: AuthContext {
                access_token_ttl: Duration::minutes(self.auth.access_token_ttl_minutes),
                refresh_token_ttl: Duration::days(self.auth.refresh_token_ttl_days),
            },
        }
    }

    /// Builds a context whose pool only connects on first use.
    pub fn to_lazy_context(self) -> Result<Context, database::Error> {
        let db_conn = database::connect_lazy(&self.database)?;
        Ok(self.into_context(db_conn))
    }
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, database::Error> {
        let db_conn = database::connect(&self.database).await?;
        database::migrate(&db_conn).await?;

        Ok(self.into_context(db_conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/app")]))
            .unwrap();

        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.url, "http://0.0.0.0:8000");
        assert_eq!(config.app.environment, AppEnvironment::Development);
        assert_eq!(config.orders.status_policy, StatusPolicy::Strict);
        assert_eq!(config.auth.access_token_ttl_minutes, 60);
        assert_eq!(config.auth.refresh_token_ttl_days, 30);
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
        assert_eq!(err.to_string(), "DATABASE_URL not set");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT", "eighty".to_string()));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("ORDER_STATUS_POLICY", "anything-goes"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid("ORDER_STATUS_POLICY", "anything-goes".to_string())
        );
    }

    #[test]
    fn permissive_policy_and_production_env_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("APP_ENV", "production"),
            ("ORDER_STATUS_POLICY", "permissive"),
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
        ]))
        .unwrap();

        assert_eq!(config.app.environment, AppEnvironment::Production);
        assert_eq!(config.orders.status_policy, StatusPolicy::Permissive);
        assert_eq!(config.app.url, "http://127.0.0.1:9000");
    }
}
