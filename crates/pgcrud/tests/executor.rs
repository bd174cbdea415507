//! Execution-path tests against an in-memory executor.

use pgcrud::{CrudResult, Executor, Row, Value, values};
use std::sync::Mutex;
use tokio_postgres::types::ToSql;

/// Records every statement it receives and answers with canned results.
struct MockExecutor {
    calls: Mutex<Vec<(String, usize)>>,
    rows: Vec<Row>,
    affected: u64,
}

impl MockExecutor {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            rows: Vec::new(),
            affected: 0,
        }
    }

    fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::new()
        }
    }

    fn with_affected(affected: u64) -> Self {
        Self {
            affected,
            ..Self::new()
        }
    }

    fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Executor for MockExecutor {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CrudResult<Vec<Row>> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.len()));
        Ok(self.rows.clone())
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CrudResult<u64> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.len()));
        Ok(self.affected)
    }
}

fn sample_row() -> Row {
    Row::from_pairs(vec![
        ("id".to_string(), Value::Int(1)),
        ("username".to_string(), Value::Text("alice".to_string())),
    ])
}

#[tokio::test]
async fn select_hands_built_sql_to_executor() {
    let exec = MockExecutor::with_rows(vec![sample_row()]);
    let rows = pgcrud::select("users", values! { "username" => "alice" })
        .fetch_all(&exec)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&Value::Int(1)));
    assert_eq!(
        exec.calls(),
        vec![("SELECT * FROM users WHERE username = $1".to_string(), 1)]
    );
}

#[tokio::test]
async fn insert_executes_with_all_params() {
    let exec = MockExecutor::with_affected(1);
    let affected = pgcrud::insert("users", values! { "username" => "alice", "age" => 30i64 })
        .unwrap()
        .execute(&exec)
        .await
        .unwrap();

    assert_eq!(affected, 1);
    assert_eq!(
        exec.calls(),
        vec![(
            "INSERT INTO users (username, age) VALUES ($1, $2)".to_string(),
            2
        )]
    );
}

#[tokio::test]
async fn update_executes_with_set_then_where_params() {
    let exec = MockExecutor::with_affected(3);
    let affected = pgcrud::update(
        "users",
        values! { "status" => "inactive" },
        values! { "role" => "guest" },
    )
    .unwrap()
    .execute(&exec)
    .await
    .unwrap();

    assert_eq!(affected, 3);
    assert_eq!(
        exec.calls(),
        vec![("UPDATE users SET status = $1 WHERE role = $2".to_string(), 2)]
    );
}

#[tokio::test]
async fn run_returns_rows_when_wanted() {
    let exec = MockExecutor::with_rows(vec![sample_row(), sample_row()]);
    let outcome = pgcrud::select("users", values! {})
        .run(&exec, true)
        .await
        .unwrap();

    let rows = outcome.into_rows().expect("expected rows");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn run_returns_affected_count_otherwise() {
    let exec = MockExecutor::with_affected(7);
    let outcome = pgcrud::delete("sessions", values! { "user_id" => 1i64 })
        .run(&exec, false)
        .await
        .unwrap();

    assert_eq!(outcome.affected(), Some(7));
    assert!(outcome.into_rows().is_none());
    assert_eq!(
        exec.calls(),
        vec![("DELETE FROM sessions WHERE user_id = $1".to_string(), 1)]
    );
}

#[tokio::test]
async fn raw_query_binds_in_order() {
    let exec = MockExecutor::with_rows(vec![sample_row()]);
    let rows = pgcrud::query("SELECT * FROM users WHERE id = $1 AND status = $2")
        .bind(1i64)
        .bind("active")
        .fetch_all(&exec)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        exec.calls(),
        vec![(
            "SELECT * FROM users WHERE id = $1 AND status = $2".to_string(),
            2
        )]
    );
}

#[tokio::test]
async fn query_opt_returns_first_row() {
    let exec = MockExecutor::with_rows(vec![sample_row(), sample_row()]);
    let row = exec.query_opt("SELECT * FROM users", &[]).await.unwrap();
    assert_eq!(row, Some(sample_row()));

    let empty = MockExecutor::new();
    let none = empty.query_opt("SELECT * FROM users", &[]).await.unwrap();
    assert_eq!(none, None);
}
