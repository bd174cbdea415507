//! Structured SQL builder.
//!
//! Four key-value shaped operations (select/insert/update/delete) over a
//! single table, each producing a [`Query`] ready to execute.
//!
//! ## Design
//!
//! - SQL stays explicit (strings), but the common CRUD shapes are structured.
//! - Placeholders are managed automatically ($1, $2, ...): one insertion-order
//!   traversal of the column mapping produces both the SQL and the parameter
//!   list, so they can never disagree.
//! - Mutations that would be no-ops by construction (INSERT/UPDATE with no
//!   columns) are rejected before touching the database.

pub mod delete;
pub mod insert;
pub mod query;
pub mod select;
pub mod update;
pub mod values;

pub use delete::delete;
pub use insert::insert;
pub use query::{Query, QueryOutcome, query};
pub use select::select;
pub use update::update;
pub use values::Values;
