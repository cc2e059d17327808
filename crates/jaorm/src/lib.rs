//! # jaorm
//!
//! Condition trees and statement compilation for JSON:API-style resource models.
//!
//! ## Features
//!
//! - **Condition trees**: `Cond::field("k").equals(v)`, `like`, `json_contains`,
//!   negation, and `and` / `or` composition, rendered to a WHERE fragment
//! - **CRUD compilation**: insert, point select, search, paginated list,
//!   delete, and update statements from a model or resource
//! - **Diff-based updates**: the SET clause holds only what a transform changed
//! - **Safe quoting**: backtick identifiers, escaped single-quoted literals
//! - **Safe defaults**: UPDATE requires WHERE and a non-empty SET
//!
//! Nothing here executes SQL; every function returns a finished statement.
//!
//! ```
//! use jaorm::{Cond, ListOptions, Model, Updater, fields};
//!
//! let company = Model::new("company", fields! { "name" => "WithmeToday" }).with_id("c1");
//!
//! let page = jaorm::list(
//!     &company,
//!     &ListOptions::new()
//!         .cond(Cond::field("name").like("With%"))
//!         .sort("-name"),
//! )?;
//! assert!(page.contains("ORDER BY `name` DESC LIMIT 10 OFFSET 0"));
//!
//! let sql = jaorm::update(
//!     &company,
//!     Updater::transform(|mut f| {
//!         f.insert("name", "AnotherCompany");
//!         f
//!     }),
//!     &Cond::field("id").equals("c1"),
//! )?;
//! assert_eq!(
//!     sql,
//!     "UPDATE `companies` SET `name` = 'AnotherCompany' WHERE `id` = 'c1';"
//! );
//! # Ok::<(), jaorm::OrmError>(())
//! ```

pub mod cond;
pub mod diff;
pub mod error;
pub mod escape;
pub mod model;
pub mod naming;
pub mod query;
pub mod value;

pub use cond::{Cond, CondOp, Conj, Field};
pub use diff::{diff, is_unchanged};
pub use error::{OrmError, OrmResult};
pub use model::{Model, Resource, ResourceIdentifier, ResourceObject};
pub use naming::{column_name, table_name};
pub use query::{
    Compiler, CompilerConfig, DEFAULT_PAGE_SIZE, ListOptions, Updater, delete, insert, list,
    search, select, update,
};
pub use value::{Fields, Value};
