//! # sqlx-named-sql
//!
//! Reads annotated SQL source files and rewrites their named placeholders into
//! PostgreSQL positional parameters, keeping an ordered list of the names.
//!
//! ## Features
//!
//! - **Named Placeholders**: Write `:param_name` in SQL, get `$1`, `$2`, ... back
//! - **Quote Aware**: `':x'`, `":x"`, `E'\':x'` and `x::int` are never rewritten
//! - **Stable Ordinals**: Each distinct name is numbered by first occurrence and reused afterwards
//! - **Embedded Configuration**: A `/* pgxsql ... pgxsql */` comment carries TOML settings for the query
//! - **Type Resolution**: Parameter types are described by PostgreSQL through any SQLx `Executor`
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sqlx = { version = "0.8", features = ["postgres", "runtime-tokio"] }
//! sqlx-named-sql = "0.1"
//! ```
//!
//! ## Examples
//!
//! ### Rewriting a Statement
//!
//! ```rust
//! use sqlx_named_sql::build_query;
//!
//! let rewritten = build_query("select * from person where id = :id or manager_id = :id")?;
//! assert_eq!(rewritten.sql, "select * from person where id = $1 or manager_id = $1");
//! assert_eq!(rewritten.parameters[0].name, "id");
//! # Ok::<(), sqlx_named_sql::Error>(())
//! ```
//!
//! ### Parsing a Source Document
//!
//! ```rust
//! use sqlx_named_sql::QuerySource;
//!
//! let document = r#"/* pgxsql
//! package = "main"
//! name = "GetPerson"
//! pgxsql */
//!
//! select name from person where id = :id and name <> ':id';
//! "#;
//!
//! let source = QuerySource::parse(document)?;
//! assert_eq!(source.package, "main");
//! assert_eq!(source.name, "GetPerson");
//! assert_eq!(source.sql, "select name from person where id = $1 and name <> ':id';");
//! # Ok::<(), sqlx_named_sql::Error>(())
//! ```
//!
//! ### Resolving Parameter Types
//!
//! ```rust,no_run
//! use sqlx::PgPool;
//! use sqlx_named_sql::QuerySource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgres://localhost/test").await?;
//!
//! let source = QuerySource::new("select name from person where id = :id", &pool).await?;
//! let id = source.named_parameter("id").expect("declared above");
//! println!("{:?}", id.data_type);
//! # Ok(())
//! # }
//! ```
//!
//! ## How It Works
//!
//! 1. **Split**: The configuration comment is cut out of the document; the rest is the SQL
//! 2. **Tokenize**: A small state machine walks the SQL, tracking string, identifier and
//!    escape-string literals, and separates literal text from `:name` placeholders
//! 3. **Fold**: Placeholders are numbered by first occurrence and replaced with `$n`
//! 4. **Describe**: Optionally, the rewritten statement is prepared so PostgreSQL reports
//!    the type of each `$n`
//!
//! ## Limitations
//!
//! - Placeholder names must match `[a-zA-Z0-9_]+`
//! - Dollar-quoted strings and comments inside the SQL are not recognized, so
//!   placeholder-like text inside them is rewritten
//! - One statement per document
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at your option.

pub mod builder;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parameter;
pub mod query;
pub mod splitter;

pub use builder::{build_query, RewrittenSql};
pub use error::{Error, Result};
pub use parameter::{DataType, Parameter};
pub use query::QuerySource;

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::QuerySource;
    pub use crate::{build_query, DataType, Parameter};
}
