use super::query::Query;
use super::values::Values;
use crate::error::{CrudError, CrudResult};

/// Build an `UPDATE table SET ..` query with optional equality filters.
///
/// SET pairs come first, then WHERE pairs, so WHERE placeholder numbering
/// continues where the SET list left off. An empty SET mapping is rejected;
/// empty filters update every row.
pub fn update(table: &str, values: Values, filters: Values) -> CrudResult<Query> {
    if values.is_empty() {
        return Err(CrudError::empty_values(format!(
            "UPDATE {} requires at least one SET column",
            table
        )));
    }

    let set_count = values.len();
    let (set_clause, mut params) = values.into_eq_clause(", ", 0);
    let mut sql = format!("UPDATE {} SET {}", table, set_clause);

    if !filters.is_empty() {
        let (where_clause, where_params) = filters.into_eq_clause(" AND ", set_count);
        sql.push_str(" WHERE ");
        sql.push_str(&where_clause);
        params.extend(where_params);
    }

    Ok(Query::new(sql, params))
}
