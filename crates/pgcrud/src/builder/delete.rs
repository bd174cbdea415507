use super::query::Query;
use super::values::Values;

/// Build a `DELETE FROM table` query with optional equality filters.
///
/// Empty filters delete every row; callers wanting a guard should pass at
/// least one filter.
pub fn delete(table: &str, filters: Values) -> Query {
    let mut sql = format!("DELETE FROM {}", table);
    if filters.is_empty() {
        return Query::new(sql, Vec::new());
    }
    let (clause, params) = filters.into_eq_clause(" AND ", 0);
    sql.push_str(" WHERE ");
    sql.push_str(&clause);
    Query::new(sql, params)
}
