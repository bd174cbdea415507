//! # pgcrud
//!
//! A minimal key-value CRUD query layer over a single PostgreSQL connection.
//!
//! ## Features
//!
//! - **Parameter-safe by construction**: table rows are described as ordered
//!   column/value mappings, and one traversal of the mapping produces both the
//!   SQL and the bound parameter list ($1, $2, ...)
//! - **Decoded rows**: results come back as ordered name/value pairs, never
//!   driver row handles
//! - **Transaction-friendly**: pass a transaction anywhere an [`Executor`] is
//!   expected
//! - **No-op guard**: INSERT and UPDATE reject an empty column mapping before
//!   touching the database
//!
//! ## Usage
//!
//! ```ignore
//! use pgcrud::{Db, DbConfig, values};
//!
//! let db = Db::connect(&DbConfig::from_env()?).await?;
//!
//! db.insert("users", values! {
//!     "username" => "alice",
//!     "email" => "alice@example.com",
//! })
//! .await?;
//!
//! let rows = db.select("users", values! { "username" => "alice" }).await?;
//!
//! db.update(
//!     "users",
//!     values! { "status" => "inactive" },
//!     values! { "username" => "alice" },
//! )
//! .await?;
//!
//! db.delete("users", values! { "username" => "alice" }).await?;
//! ```
//!
//! Hand-written SQL still works through [`query`]:
//!
//! ```ignore
//! let rows = pgcrud::query("SELECT * FROM users WHERE id = $1")
//!     .bind(42_i64)
//!     .fetch_all(db.client())
//!     .await?;
//! ```

pub mod builder;
pub mod client;
pub mod db;
pub mod error;
pub mod row;

pub use builder::{Query, QueryOutcome, Values, delete, insert, query, select, update};
pub use client::Executor;
pub use db::{Db, DbConfig};
pub use error::{CrudError, CrudResult};
pub use row::{Row, Value};
