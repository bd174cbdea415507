//! Ordered column/value mappings for the query builder.

use tokio_postgres::types::ToSql;

/// An ordered column→value mapping, used both for SET/INSERT values and for
/// equality filters.
///
/// Insertion order is iteration order, and iteration order determines
/// placeholder numbering in the built SQL: the same traversal produces both
/// the SQL string and the parameter list, so the n-th `$n` always binds the
/// n-th parameter.
///
/// Re-setting an existing column replaces its value in place, keeping the
/// original position.
#[derive(Default)]
pub struct Values {
    entries: Vec<(String, Box<dyn ToSql + Sync + Send>)>,
}

impl Values {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value.
    pub fn set<T>(&mut self, column: &str, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        match self.entries.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => *slot = Box::new(value),
            None => self.entries.push((column.to_string(), Box::new(value))),
        }
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = value {
            self.set(column, v);
        }
        self
    }

    /// Set a JSON column.
    pub fn set_json<T>(&mut self, column: &str, value: &T) -> serde_json::Result<&mut Self>
    where
        T: serde::Serialize + Sync + Send,
    {
        let json_val = serde_json::to_value(value)?;
        Ok(self.set(column, json_val))
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no columns have been set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split into column names and parameters, both in insertion order.
    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Box<dyn ToSql + Sync + Send>>) {
        self.entries.into_iter().unzip()
    }

    /// Render `col = $n` pairs joined by `separator`, numbering placeholders
    /// from `offset + 1`, and hand back the parameters in the same order.
    pub(crate) fn into_eq_clause(
        self,
        separator: &str,
        offset: usize,
    ) -> (String, Vec<Box<dyn ToSql + Sync + Send>>) {
        let (columns, params) = self.into_parts();
        let clause = columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ${}", col, offset + i + 1))
            .collect::<Vec<_>>()
            .join(separator);
        (clause, params)
    }
}

impl std::fmt::Debug for Values {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.columns()).finish()
    }
}

/// Build a [`Values`] mapping from `column => value` pairs.
///
/// # Example
///
/// ```ignore
/// let filters = pgcrud::values! { "status" => "active", "role_id" => 1 };
/// ```
#[macro_export]
macro_rules! values {
    () => {
        $crate::builder::Values::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {{
        let mut vals = $crate::builder::Values::new();
        $(vals.set($column, $value);)+
        vals
    }};
}
