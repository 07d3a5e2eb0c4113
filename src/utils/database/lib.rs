use crate::types::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::fmt;

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

#[derive(Debug)]
pub enum Error {
    ConnectionFailed(String),
    MigrationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed(err) => write!(f, "Error connecting to database: {}", err),
            Self::MigrationFailed(err) => write!(f, "Failed to run database migrations: {}", err),
        }
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new().max_connections(config.max_connections)
}

pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, Error> {
    pool_options(config)
        .connect(&config.url)
        .await
        .map(|pool| DatabaseConnection { pool })
        .map_err(|err| {
            tracing::error!("{:}", err);
            Error::ConnectionFailed(err.to_string())
        })
}

pub fn connect_lazy(config: &DatabaseConfig) -> Result<DatabaseConnection, Error> {
    pool_options(config)
        .connect_lazy(&config.url)
        .map(|pool| DatabaseConnection { pool })
        .map_err(|err| Error::ConnectionFailed(err.to_string()))
}

pub async fn migrate(db_conn: &DatabaseConnection) -> Result<(), Error> {
    sqlx::migrate!().run(&db_conn.pool).await.map_err(|err| {
        tracing::error!("{}", err);
        Error::MigrationFailed(err.to_string())
    })
}
