//! Connection facade.
//!
//! [`Db`] owns a single connection and exposes the four CRUD operations as
//! build-and-run methods. Connection settings come from a [`DbConfig`], which
//! can be loaded from the standard `PG*` environment variables.

use crate::builder::{self, QueryOutcome, Values};
use crate::client::Executor;
use crate::error::{CrudError, CrudResult};
use crate::row::Row;
use tokio_postgres::NoTls;

/// Connection settings for a single database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl DbConfig {
    /// Load settings from `PGHOST`, `PGPORT`, `PGUSER`, `PGPASSWORD` and
    /// `PGDATABASE`, reading a `.env` file first if one exists.
    ///
    /// `PGHOST` defaults to `localhost` and `PGPORT` to `5432`; the remaining
    /// variables are required.
    pub fn from_env() -> CrudResult<Self> {
        // Ignore a missing .env file, real environment still applies.
        let _ = dotenvy::dotenv();

        let host = std::env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());
        let port = match std::env::var("PGPORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| CrudError::Config(format!("invalid PGPORT: {}", raw)))?,
            Err(_) => 5432,
        };
        let user = require_env("PGUSER")?;
        let password = require_env("PGPASSWORD")?;
        let dbname = require_env("PGDATABASE")?;

        Ok(Self {
            host,
            port,
            user,
            password,
            dbname,
        })
    }

    fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(&self.dbname);
        config
    }
}

fn require_env(name: &str) -> CrudResult<String> {
    std::env::var(name).map_err(|_| CrudError::Config(format!("{} is not set", name)))
}

/// A single database connection with CRUD helpers.
///
/// # Example
///
/// ```ignore
/// let db = Db::connect(&DbConfig::from_env()?).await?;
/// db.insert("users", values! { "username" => "alice" }).await?;
/// let rows = db.select("users", values! { "username" => "alice" }).await?;
/// ```
pub struct Db {
    client: tokio_postgres::Client,
}

impl Db {
    /// Open a connection and spawn its driver task.
    ///
    /// The driver task runs until the connection closes; an abnormal close is
    /// logged and surfaces as errors on subsequent queries.
    pub async fn connect(config: &DbConfig) -> CrudResult<Self> {
        let (client, connection) = config
            .to_pg_config()
            .connect(NoTls)
            .await
            .map_err(|e| CrudError::Connection(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(target: "pgcrud.conn", error = %e, "connection terminated");
            }
        });

        tracing::debug!(
            target: "pgcrud.conn",
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            "connected"
        );

        Ok(Self { client })
    }

    /// Wrap an already-connected client.
    pub fn from_client(client: tokio_postgres::Client) -> Self {
        Self { client }
    }

    /// The underlying client, for hand-written SQL.
    pub fn client(&self) -> &tokio_postgres::Client {
        &self.client
    }

    /// `SELECT * FROM table` with equality filters; returns all matching rows.
    pub async fn select(&self, table: &str, filters: Values) -> CrudResult<Vec<Row>> {
        builder::select(table, filters).fetch_all(&self.client).await
    }

    /// Insert one row; returns the affected-row count.
    pub async fn insert(&self, table: &str, values: Values) -> CrudResult<u64> {
        builder::insert(table, values)?.execute(&self.client).await
    }

    /// Update rows matching the filters; returns the affected-row count.
    pub async fn update(&self, table: &str, values: Values, filters: Values) -> CrudResult<u64> {
        builder::update(table, values, filters)?
            .execute(&self.client)
            .await
    }

    /// Delete rows matching the filters; returns the affected-row count.
    ///
    /// Empty filters delete the whole table.
    pub async fn delete(&self, table: &str, filters: Values) -> CrudResult<u64> {
        builder::delete(table, filters).execute(&self.client).await
    }

    /// Run a built query in either mode: rows when `want_rows` is true,
    /// affected-row count otherwise.
    pub async fn run(&self, query: &builder::Query, want_rows: bool) -> CrudResult<QueryOutcome> {
        query.run(&self.client, want_rows).await
    }
}

impl Executor for Db {
    async fn query(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> CrudResult<Vec<Row>> {
        Executor::query(&self.client, sql, params).await
    }

    async fn execute(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> CrudResult<u64> {
        Executor::execute(&self.client, sql, params).await
    }
}
