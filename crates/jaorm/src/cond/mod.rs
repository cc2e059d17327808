//! Condition trees for WHERE clauses.
//!
//! A predicate starts from a [`Field`], which only knows its column and
//! whether it is negated. Choosing the comparison (`equals`, `like`,
//! `json_contains`) consumes the field and yields a [`Cond`], so a predicate
//! always has exactly one operator:
//!
//! ```compile_fail
//! use jaorm::Cond;
//!
//! let field = Cond::field("key");
//! let _ = field.equals("a");
//! let _ = field.like("b"); // the field was consumed by `equals`
//! ```
//!
//! Conditions combine with [`Cond::and`] / [`Cond::or`] and render left to
//! right, without added parentheses:
//!
//! ```
//! use jaorm::Cond;
//!
//! let cond = Cond::field("a").equals(1).or(Cond::field("b").equals(2));
//! assert_eq!(cond.build(), "`a` = 1 OR `b` = 2");
//! ```

use crate::escape::{write_identifier, write_literal};
use crate::value::Value;
use std::fmt;

/// Comparison operator of a single predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondOp {
    /// `key = value`
    Equals,
    /// `key LIKE pattern`
    Like,
    /// `JSON_CONTAINS(key, document)`
    JsonContains,
}

/// Conjunction joining two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conj {
    And,
    Or,
}

impl Conj {
    pub fn as_str(self) -> &'static str {
        match self {
            Conj::And => "AND",
            Conj::Or => "OR",
        }
    }
}

/// A column awaiting its comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    negated: bool,
}

impl Field {
    /// Start a predicate on `key`.
    ///
    /// # Panics
    /// Panics if `key` is empty.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        assert!(!key.is_empty(), "condition key cannot be empty");
        Self {
            key,
            negated: false,
        }
    }

    /// Toggle negation. Negating twice cancels out.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// `key = value`
    pub fn equals(self, value: impl Into<Value>) -> Cond {
        self.compare(CondOp::Equals, value.into())
    }

    /// Alias for [`Field::equals`].
    pub fn is(self, value: impl Into<Value>) -> Cond {
        self.equals(value)
    }

    /// `key LIKE pattern`
    pub fn like(self, pattern: impl Into<Value>) -> Cond {
        self.compare(CondOp::Like, pattern.into())
    }

    /// `JSON_CONTAINS(key, document)`
    ///
    /// Lists and objects are rendered as a JSON document; scalars as their literal.
    pub fn json_contains(self, document: impl Into<Value>) -> Cond {
        self.compare(CondOp::JsonContains, document.into())
    }

    fn compare(self, op: CondOp, value: Value) -> Cond {
        Cond::Compare {
            key: self.key,
            op,
            value,
            negated: self.negated,
        }
    }
}

/// A boolean condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    /// A single predicate: `[NOT] key OP value`.
    Compare {
        key: String,
        op: CondOp,
        value: Value,
        negated: bool,
    },
    /// Two conditions joined by a conjunction.
    Combined {
        conj: Conj,
        left: Box<Cond>,
        right: Box<Cond>,
        negated: bool,
    },
}

impl Cond {
    /// Start a predicate on `key`. Same as [`Field::new`].
    pub fn field(key: impl Into<String>) -> Field {
        Field::new(key)
    }

    /// `self AND other`
    pub fn and(self, other: Cond) -> Cond {
        self.combine(Conj::And, other)
    }

    /// `self OR other`
    pub fn or(self, other: Cond) -> Cond {
        self.combine(Conj::Or, other)
    }

    fn combine(self, conj: Conj, other: Cond) -> Cond {
        Cond::Combined {
            conj,
            left: Box::new(self),
            right: Box::new(other),
            negated: false,
        }
    }

    /// Toggle negation of this node. Negating twice cancels out.
    ///
    /// A negated combination renders as `NOT (...)` and negates the whole
    /// group, not only its first predicate.
    pub fn negate(mut self) -> Cond {
        match &mut self {
            Cond::Compare { negated, .. } | Cond::Combined { negated, .. } => {
                *negated = !*negated;
            }
        }
        self
    }

    pub fn is_negated(&self) -> bool {
        match self {
            Cond::Compare { negated, .. } | Cond::Combined { negated, .. } => *negated,
        }
    }

    /// Render the condition as a WHERE fragment.
    pub fn build(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    fn write_sql(&self, out: &mut String) {
        match self {
            Cond::Compare {
                key,
                op,
                value,
                negated,
            } => {
                if *negated {
                    out.push_str("NOT ");
                }
                match op {
                    CondOp::Equals => {
                        write_identifier(out, key);
                        out.push_str(" = ");
                        write_literal(out, value);
                    }
                    CondOp::Like => {
                        write_identifier(out, key);
                        out.push_str(" LIKE ");
                        write_literal(out, value);
                    }
                    CondOp::JsonContains => {
                        out.push_str("JSON_CONTAINS(");
                        write_identifier(out, key);
                        out.push_str(", ");
                        write_literal(out, value);
                        out.push(')');
                    }
                }
            }
            Cond::Combined {
                conj,
                left,
                right,
                negated,
            } => {
                if *negated {
                    out.push_str("NOT (");
                }
                left.write_sql(out);
                out.push(' ');
                out.push_str(conj.as_str());
                out.push(' ');
                right.write_sql(out);
                if *negated {
                    out.push(')');
                }
            }
        }
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
