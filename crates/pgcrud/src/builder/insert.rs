use super::query::Query;
use super::values::Values;
use crate::error::{CrudError, CrudResult};

/// Build an `INSERT INTO table (cols) VALUES ($1, ..)` query.
///
/// Columns and placeholders follow the mapping's insertion order. An empty
/// mapping is rejected before any SQL is produced.
pub fn insert(table: &str, values: Values) -> CrudResult<Query> {
    if values.is_empty() {
        return Err(CrudError::empty_values(format!(
            "INSERT INTO {} requires at least one column",
            table
        )));
    }

    let (columns, params) = values.into_parts();
    let placeholders = (1..=columns.len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    );
    Ok(Query::new(sql, params))
}
