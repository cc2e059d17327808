//! Statement compilation for resources.
//!
//! Each operation takes a [`Resource`] (a model, a resource object or
//! identifier, or a bare type name) and returns one finished statement:
//!
//! - [`insert`]: `INSERT INTO t (cols) VALUES (vals);`
//! - [`select`]: ``SELECT * FROM t WHERE `id` = '<id>' LIMIT 1;``
//! - [`search`]: `SELECT * FROM t WHERE <cond>;`
//! - [`list`]: paginated on `id` first, then joined back to full rows
//! - [`delete`]: ``DELETE FROM t WHERE `id` = '<id>';``
//! - [`update`]: `UPDATE t SET <changes> WHERE <cond>;`
//!
//! The table is derived from the resource type with [`table_name`]. Validation
//! failures return an [`OrmError`] and no SQL.
//!
//! # Example
//! ```
//! use jaorm::{Cond, Model, fields};
//!
//! let model = Model::new("company", fields! { "name" => "acme" }).with_id("c1");
//!
//! assert_eq!(
//!     jaorm::insert(&model)?,
//!     "INSERT INTO `companies` (`id`, `name`) VALUES ('c1', 'acme');"
//! );
//! assert_eq!(
//!     jaorm::search("company", &Cond::field("name").like("ac%"))?,
//!     "SELECT * FROM `companies` WHERE `name` LIKE 'ac%';"
//! );
//! # Ok::<(), jaorm::OrmError>(())
//! ```

mod config;

pub use config::{CompilerConfig, DEFAULT_PAGE_SIZE};

use crate::cond::Cond;
use crate::diff::diff;
use crate::error::{OrmError, OrmResult};
use crate::escape::{
    expand_identifiers, expand_literals, quote_identifier, quote_literal, write_identifier,
    write_literal,
};
use crate::model::Resource;
use crate::naming::{column_name, table_name};
use crate::value::{Fields, Value};
use std::fmt;

/// Options for [`list`] queries.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Zero-based page number.
    pub page: u64,
    /// Rows per page. `0` means the configured default.
    pub size: u64,
    /// Optional filter applied before pagination.
    pub cond: Option<Cond>,
    /// Sort columns in priority order. A leading `-` sorts descending.
    pub sort: Vec<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn cond(mut self, cond: Cond) -> Self {
        self.cond = Some(cond);
        self
    }

    /// Append a sort column (`"-col"` for descending).
    pub fn sort(mut self, column: impl Into<String>) -> Self {
        self.sort.push(column.into());
        self
    }

    /// Append several sort columns.
    pub fn sort_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort.extend(columns.into_iter().map(Into::into));
        self
    }
}

/// How an [`update`] computes its SET clause.
pub enum Updater<'a> {
    /// Transform a copy of the current attributes; the structural diff becomes the SET clause.
    Transform(Box<dyn FnOnce(Fields) -> Fields + 'a>),
    /// Use this change set as-is. An object value for an attribute that
    /// currently holds an object is merged into it.
    Changes(Fields),
}

impl<'a> Updater<'a> {
    pub fn transform<F>(f: F) -> Self
    where
        F: FnOnce(Fields) -> Fields + 'a,
    {
        Updater::Transform(Box::new(f))
    }

    pub fn changes(fields: Fields) -> Self {
        Updater::Changes(fields)
    }
}

impl From<Fields> for Updater<'_> {
    fn from(fields: Fields) -> Self {
        Updater::Changes(fields)
    }
}

impl fmt::Debug for Updater<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Updater::Transform(_) => f.write_str("Updater::Transform(..)"),
            Updater::Changes(fields) => f.debug_tuple("Updater::Changes").field(fields).finish(),
        }
    }
}

/// Statement compiler carrying a [`CompilerConfig`].
///
/// The free functions in this module use `Compiler::default()`.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// ``INSERT INTO t (`id`, ...) VALUES ('<id>', ...);``
    ///
    /// Columns are `id` followed by the attributes in order, snake-cased.
    pub fn insert<R: Resource + ?Sized>(&self, resource: &R) -> OrmResult<String> {
        let id = non_empty_id(resource).ok_or(OrmError::IdRequired)?;
        let table = table_name(resource.type_name());

        let mut map = Fields::new().with("id", id);
        if let Some(attributes) = resource.attributes() {
            map.extend(
                attributes
                    .iter()
                    .map(|(name, value)| (column_name(name), value.clone())),
            );
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            quote_identifier(&table),
            expand_identifiers(map.keys()),
            expand_literals(map.values()),
        );
        Ok(self.finish("insert", &table, sql))
    }

    /// ``SELECT * FROM t WHERE `id` = '<id>' LIMIT 1;``
    pub fn select<R: Resource + ?Sized>(&self, resource: &R) -> OrmResult<String> {
        let id = non_empty_id(resource).ok_or(OrmError::InvalidId)?;
        let table = table_name(resource.type_name());
        let sql = format!(
            "SELECT * FROM {} WHERE `id` = {} LIMIT 1;",
            quote_identifier(&table),
            quote_literal(&Value::from(id)),
        );
        Ok(self.finish("select", &table, sql))
    }

    /// `SELECT * FROM t WHERE <cond>;`
    pub fn search<R: Resource + ?Sized>(&self, resource: &R, cond: &Cond) -> OrmResult<String> {
        let table = table_name(resource.type_name());
        let sql = format!(
            "SELECT * FROM {} WHERE {};",
            quote_identifier(&table),
            cond.build()
        );
        Ok(self.finish("search", &table, sql))
    }

    /// Paginated listing.
    ///
    /// The inner query pages over `id` only (filtered and sorted as requested),
    /// and the outer query joins the full rows back on `id`:
    ///
    /// ```text
    /// SELECT * FROM t INNER JOIN ( SELECT `id` FROM t [WHERE ..] [ORDER BY ..]
    ///   LIMIT <size> OFFSET <page * size> ) AS `result` USING (`id`);
    /// ```
    pub fn list<R: Resource + ?Sized>(&self, resource: &R, opts: &ListOptions) -> OrmResult<String> {
        non_empty_id(resource).ok_or(OrmError::InvalidId)?;
        let table = table_name(resource.type_name());
        let quoted = quote_identifier(&table);
        let size = self.config.page_size(opts.size);
        let offset = opts
            .page
            .checked_mul(size)
            .ok_or_else(|| OrmError::validation("list offset overflows u64"))?;

        let mut inner = format!("SELECT `id` FROM {quoted}");
        if let Some(cond) = &opts.cond {
            inner.push_str(" WHERE ");
            inner.push_str(&cond.build());
        }
        if !opts.sort.is_empty() {
            inner.push_str(" ORDER BY ");
            inner.push_str(&order_by(&opts.sort));
        }
        inner.push_str(&format!(" LIMIT {size} OFFSET {offset}"));

        let sql = format!(
            "SELECT * FROM {quoted} INNER JOIN ( {inner} ) AS `result` USING (`id`);"
        );
        Ok(self.finish("list", &table, sql))
    }

    /// ``DELETE FROM t WHERE `id` = '<id>';``
    pub fn delete<R: Resource + ?Sized>(&self, resource: &R) -> OrmResult<String> {
        let id = non_empty_id(resource).ok_or(OrmError::InvalidId)?;
        let table = table_name(resource.type_name());
        let sql = format!(
            "DELETE FROM {} WHERE `id` = {};",
            quote_identifier(&table),
            quote_literal(&Value::from(id)),
        );
        Ok(self.finish("delete", &table, sql))
    }

    /// `UPDATE t SET <changes> WHERE <cond>;`
    ///
    /// A [`Updater::Transform`] needs a resource with attributes, otherwise
    /// [`OrmError::NotUpdatableObject`]. An empty change set is rejected.
    ///
    /// Scalars and whole values are assigned directly. A partial object for
    /// an attribute that currently holds an object becomes a `JSON_SET` of
    /// the changed paths, so sibling keys survive:
    ///
    /// ```text
    /// `address` = JSON_SET(`address`, '$.city', 'Busan')
    /// ```
    pub fn update<R: Resource + ?Sized>(
        &self,
        resource: &R,
        updater: Updater<'_>,
        cond: &Cond,
    ) -> OrmResult<String> {
        let current = resource.attributes();
        let changes = match updater {
            Updater::Transform(f) => {
                let before = current.ok_or(OrmError::NotUpdatableObject)?;
                let after = f(before.clone());
                diff(&after, before)
            }
            Updater::Changes(changes) => changes,
        };

        let mut set = String::new();
        for (name, value) in changes.iter() {
            let mark = set.len();
            if !set.is_empty() {
                set.push_str(", ");
            }
            let column = column_name(name);
            if !write_assignment(&mut set, &column, current.and_then(|c| c.get(name)), value) {
                set.truncate(mark);
            }
        }
        if set.is_empty() {
            return Err(OrmError::validation("UPDATE SET clause cannot be empty"));
        }

        let table = table_name(resource.type_name());
        let sql = format!(
            "UPDATE {} SET {} WHERE {};",
            quote_identifier(&table),
            set,
            cond.build()
        );
        Ok(self.finish("update", &table, sql))
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn finish(&self, operation: &'static str, table: &str, sql: String) -> String {
        #[cfg(feature = "tracing")]
        if self.config.log_statements {
            let shown = match self.config.log_max_sql_length {
                Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(&sql, max)),
                _ => sql.clone(),
            };
            tracing::debug!(target: "jaorm.sql", operation, table, sql = %shown, "compiled statement");
        }
        sql
    }
}

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max: usize) -> &str {
    let mut end = max.min(sql.len());
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn non_empty_id<R: Resource + ?Sized>(resource: &R) -> Option<&str> {
    resource.id().filter(|id| !id.is_empty())
}

/// Write one SET entry. Returns false when a merge into an object column
/// has no paths to set, leaving whatever was written to be discarded.
fn write_assignment(
    out: &mut String,
    column: &str,
    current: Option<&Value>,
    change: &Value,
) -> bool {
    write_identifier(out, column);
    out.push_str(" = ");

    let (Some(Value::Object(current)), Value::Object(change)) = (current, change) else {
        write_literal(out, change);
        return true;
    };
    let mut paths = Vec::new();
    json_paths("$", current, change, &mut paths);
    if paths.is_empty() {
        return false;
    }

    out.push_str("JSON_SET(");
    write_identifier(out, column);
    for (path, value) in paths {
        out.push_str(", ");
        write_literal(out, &Value::Text(path));
        out.push_str(", ");
        write_json_value(out, value);
    }
    out.push(')');
    true
}

/// Flatten a partial object into `(json path, new value)` pairs, descending
/// wherever the current document also holds an object.
fn json_paths<'a>(
    prefix: &str,
    current: &Fields,
    change: &'a Fields,
    out: &mut Vec<(String, &'a Value)>,
) {
    for (key, value) in change.iter() {
        let path = format!("{prefix}.{}", json_path_member(key));
        match (current.get(key), value) {
            (Some(Value::Object(inner)), Value::Object(sub)) => json_paths(&path, inner, sub, out),
            _ => out.push((path, value)),
        }
    }
}

fn json_path_member(key: &str) -> String {
    let plain = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        return key.to_string();
    }
    let mut member = String::with_capacity(key.len() + 2);
    member.push('"');
    for ch in key.chars() {
        if matches!(ch, '"' | '\\') {
            member.push('\\');
        }
        member.push(ch);
    }
    member.push('"');
    member
}

/// Values that are not plain SQL scalars go in as JSON documents.
fn write_json_value(out: &mut String, value: &Value) {
    match value {
        Value::Bool(_) | Value::List(_) | Value::Object(_) => {
            out.push_str("CAST(");
            write_literal(out, &Value::Text(value.to_json().to_string()));
            out.push_str(" AS JSON)");
        }
        _ => write_literal(out, value),
    }
}

fn order_by(sort: &[String]) -> String {
    sort.iter()
        .map(|col| match col.strip_prefix('-') {
            Some(desc) if !desc.is_empty() => format!("{} DESC", quote_identifier(desc)),
            _ => quote_identifier(col),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compile an INSERT with the default configuration. See [`Compiler::insert`].
pub fn insert<R: Resource + ?Sized>(resource: &R) -> OrmResult<String> {
    Compiler::default().insert(resource)
}

/// Compile a point SELECT with the default configuration. See [`Compiler::select`].
pub fn select<R: Resource + ?Sized>(resource: &R) -> OrmResult<String> {
    Compiler::default().select(resource)
}

/// Compile a filtered SELECT with the default configuration. See [`Compiler::search`].
pub fn search<R: Resource + ?Sized>(resource: &R, cond: &Cond) -> OrmResult<String> {
    Compiler::default().search(resource, cond)
}

/// Compile a paginated listing with the default configuration. See [`Compiler::list`].
pub fn list<R: Resource + ?Sized>(resource: &R, opts: &ListOptions) -> OrmResult<String> {
    Compiler::default().list(resource, opts)
}

/// Compile a DELETE with the default configuration. See [`Compiler::delete`].
pub fn delete<R: Resource + ?Sized>(resource: &R) -> OrmResult<String> {
    Compiler::default().delete(resource)
}

/// Compile an UPDATE with the default configuration. See [`Compiler::update`].
pub fn update<R: Resource + ?Sized>(
    resource: &R,
    updater: Updater<'_>,
    cond: &Cond,
) -> OrmResult<String> {
    Compiler::default().update(resource, updater, cond)
}
