//! Built queries and their execution helpers.

use crate::client::Executor;
use crate::error::CrudResult;
use crate::row::Row;
use tokio_postgres::types::ToSql;

/// A built query: SQL with `$1..$n` positional placeholders plus the
/// parameters bound to them, in placeholder order.
///
/// Queries are constructed fresh per call, handed to an [`Executor`], and
/// dropped. They hold no connection state.
pub struct Query {
    sql: String,
    params: Vec<Box<dyn ToSql + Sync + Send>>,
}

/// Create a query from hand-written SQL; bind parameters with
/// [`Query::bind`].
///
/// # Example
///
/// ```ignore
/// let rows = pgcrud::query("SELECT * FROM users WHERE id = $1")
///     .bind(42_i64)
///     .fetch_all(&client)
///     .await?;
/// ```
pub fn query(sql: impl Into<String>) -> Query {
    Query {
        sql: sql.into(),
        params: Vec::new(),
    }
}

impl Query {
    pub(crate) fn new(sql: String, params: Vec<Box<dyn ToSql + Sync + Send>>) -> Self {
        Self { sql, params }
    }

    /// Bind a parameter to the next placeholder.
    pub fn bind<T: ToSql + Sync + Send + 'static>(mut self, value: T) -> Self {
        self.params.push(Box::new(value));
        self
    }

    /// The SQL string.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters as references compatible with tokio-postgres.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }

    /// Number of bound parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Execute the query and return all rows, decoded.
    pub async fn fetch_all(&self, conn: &impl Executor) -> CrudResult<Vec<Row>> {
        self.trace();
        conn.query(&self.sql, &self.params()).await
    }

    /// Execute the query and return the number of affected rows.
    pub async fn execute(&self, conn: &impl Executor) -> CrudResult<u64> {
        self.trace();
        conn.execute(&self.sql, &self.params()).await
    }

    /// Execute the query in either mode: rows when `want_rows` is true,
    /// affected-row count otherwise.
    pub async fn run(&self, conn: &impl Executor, want_rows: bool) -> CrudResult<QueryOutcome> {
        if want_rows {
            Ok(QueryOutcome::Rows(self.fetch_all(conn).await?))
        } else {
            Ok(QueryOutcome::Affected(self.execute(conn).await?))
        }
    }

    fn trace(&self) {
        tracing::debug!(
            target: "pgcrud.sql",
            sql = %self.sql,
            param_count = self.params.len(),
        );
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("sql", &self.sql)
            .field("param_count", &self.params.len())
            .finish()
    }
}

/// Result of running a query in either execution mode.
#[derive(Debug)]
pub enum QueryOutcome {
    /// Decoded result rows (SELECT).
    Rows(Vec<Row>),
    /// Affected-row count (INSERT/UPDATE/DELETE).
    Affected(u64),
}

impl QueryOutcome {
    /// The rows, if this outcome carries rows.
    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Affected(_) => None,
        }
    }

    /// The affected-row count, if this outcome carries one.
    pub fn affected(&self) -> Option<u64> {
        match self {
            QueryOutcome::Rows(_) => None,
            QueryOutcome::Affected(count) => Some(*count),
        }
    }
}
