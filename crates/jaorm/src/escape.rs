//! Identifier quoting and literal escaping.
//!
//! The dialect uses backtick-quoted identifiers and single-quoted literals
//! with backslash escapes:
//!
//! - identifiers: `` `name` ``, embedded backticks doubled, dotted names
//!   split into qualified parts (`a.b` renders as `` `a`.`b` ``)
//! - strings: `'text'` with `\0 \b \t \n \r \x1a " ' \` backslash-escaped
//! - numbers and booleans: unquoted
//! - dates and times: quoted `YYYY-MM-DD` / `YYYY-MM-DD HH:MM:SS.mmm`
//! - lists and objects: their JSON document, quoted as a string
//!
//! Every function here is pure.

use crate::value::{Fields, Value};
use std::fmt::Write as _;

/// Quote an identifier (table or column name).
///
/// # Example
/// ```
/// use jaorm::escape::quote_identifier;
///
/// assert_eq!(quote_identifier("user_id"), "`user_id`");
/// assert_eq!(quote_identifier("users.id"), "`users`.`id`");
/// ```
pub fn quote_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_identifier(&mut out, name);
    out
}

pub(crate) fn write_identifier(out: &mut String, name: &str) {
    out.push('`');
    for ch in name.chars() {
        match ch {
            '`' => out.push_str("``"),
            '.' => out.push_str("`.`"),
            c => out.push(c),
        }
    }
    out.push('`');
}

/// Render a value as a literal.
///
/// # Panics
/// Panics on a non-finite float, which has no literal form.
pub fn quote_literal(value: &Value) -> String {
    let mut out = String::new();
    write_literal(&mut out, value);
    out
}

pub(crate) fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(v) => {
            let _ = write!(out, "{v}");
        }
        Value::UInt(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Float(v) => {
            assert!(v.is_finite(), "cannot render non-finite float {v} as a literal");
            let _ = write!(out, "{v}");
        }
        Value::Text(s) => write_string(out, s),
        Value::Uuid(u) => {
            let _ = write!(out, "'{}'", u.hyphenated());
        }
        Value::Date(d) => {
            let _ = write!(out, "'{}'", d.format("%Y-%m-%d"));
        }
        Value::DateTime(dt) => {
            let _ = write!(out, "'{}'", dt.format("%Y-%m-%d %H:%M:%S%.3f"));
        }
        Value::Timestamp(ts) => {
            let _ = write!(out, "'{}'", ts.naive_utc().format("%Y-%m-%d %H:%M:%S%.3f"));
        }
        Value::List(_) | Value::Object(_) => write_string(out, &value.to_json().to_string()),
    }
}

fn write_string(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\0' => out.push_str("\\0"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1a}' => out.push_str("\\Z"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// Expand an attribute bag into `` `k1` = v1, `k2` = v2 `` in bag order.
pub fn expand_assignments(fields: &Fields) -> String {
    let mut out = String::new();
    for (i, (name, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_identifier(&mut out, name);
        out.push_str(" = ");
        write_literal(&mut out, value);
    }
    out
}

/// Expand names into a comma-separated list of quoted identifiers.
pub fn expand_identifiers<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, name) in names.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_identifier(&mut out, name.as_ref());
    }
    out
}

/// Expand values into a comma-separated list of literals.
pub fn expand_literals<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut out = String::new();
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_literal(&mut out, value);
    }
    out
}
