use super::query::Query;
use super::values::Values;

/// Build a `SELECT * FROM table` query with optional equality filters.
///
/// Filters are ANDed in insertion order; an empty mapping selects the whole
/// table.
pub fn select(table: &str, filters: Values) -> Query {
    let mut sql = format!("SELECT * FROM {}", table);
    if filters.is_empty() {
        return Query::new(sql, Vec::new());
    }
    let (clause, params) = filters.into_eq_clause(" AND ", 0);
    sql.push_str(" WHERE ");
    sql.push_str(&clause);
    Query::new(sql, params)
}
