//! Predicate expressions and their SQL rendering
//!
//! `Expr` is the small AST filters attach to queries. Rendering runs in one
//! of two bind modes: placeholder mode collects parameters into [`SqlParams`]
//! (the form handed to a database driver), literal mode inlines quoted
//! values (the form tests and logs assert against).

use crate::schema::Column;
use crate::sql::escape::quote_literal;
use crate::sql::Dialect;
use crate::value::Value;

/// Collects bind parameters during query rendering (maintains encounter order).
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<Value>,
}

/// A predicate expression over schema columns.
///
/// Negation wraps the whole expression (`Not`), not an operator swap; the
/// renderer picks the operator-level form (`!=`, `NOT IN`, `IS NOT NULL`)
/// where one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `column = value`, or `column IS NULL` when the value is null.
    Eq(Column, Value),
    /// `column = column`, for join conditions.
    ColumnEq(Column, Column),
    /// `column IN (values...)`.
    In(Column, Vec<Value>),
    /// `column BETWEEN low AND high`.
    Between(Column, Value, Value),
    /// `column LIKE pattern ESCAPE '\'`.
    Like(Column, String),
    /// Logical negation of the inner expression.
    Not(Box<Expr>),
    /// Parenthesized conjunction.
    And(Vec<Expr>),
    /// Parenthesized disjunction.
    Or(Vec<Expr>),
}

enum Binds<'a> {
    Placeholders {
        dialect: Dialect,
        params: &'a mut SqlParams,
    },
    Literals,
}

impl Binds<'_> {
    /// Render one value. Nulls and booleans are always inlined and never
    /// consume a placeholder.
    fn bind(&mut self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            _ => match self {
                Binds::Placeholders { dialect, params } => {
                    params.values.push(value.clone());
                    dialect.placeholder(params.values.len())
                }
                Binds::Literals => literal(value),
            },
        }
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::String(s) => quote_literal(s),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(literal).collect();
            format!("({})", parts.join(", "))
        }
    }
}

impl Expr {
    /// `self AND other`, flattening chained conjunctions.
    pub fn and(self, other: Expr) -> Expr {
        match self {
            Expr::And(mut items) => {
                items.push(other);
                Expr::And(items)
            }
            first => Expr::And(vec![first, other]),
        }
    }

    /// `self OR other`, flattening chained disjunctions.
    pub fn or(self, other: Expr) -> Expr {
        match self {
            Expr::Or(mut items) => {
                items.push(other);
                Expr::Or(items)
            }
            first => Expr::Or(vec![first, other]),
        }
    }

    /// Render with placeholders, appending bind values to `params`.
    pub fn to_sql(&self, dialect: Dialect, params: &mut SqlParams) -> String {
        self.render(&mut Binds::Placeholders { dialect, params })
    }

    /// Render with inline literal values.
    pub fn to_sql_literal(&self) -> String {
        self.render(&mut Binds::Literals)
    }

    fn render(&self, binds: &mut Binds) -> String {
        match self {
            Expr::Eq(col, Value::Null) => format!("{} IS NULL", col.qualified()),
            Expr::Eq(col, value) => {
                format!("{} = {}", col.qualified(), binds.bind(value))
            }
            Expr::ColumnEq(left, right) => {
                format!("{} = {}", left.qualified(), right.qualified())
            }
            Expr::In(col, values) => match render_list(values, binds) {
                Some(list) => format!("{} IN ({})", col.qualified(), list),
                // Membership in the empty set is vacuously false.
                None => "1 != 1".to_string(),
            },
            Expr::Between(col, low, high) => format!(
                "{} BETWEEN {} AND {}",
                col.qualified(),
                binds.bind(low),
                binds.bind(high)
            ),
            Expr::Like(col, pattern) => format!(
                "{} LIKE {} ESCAPE '\\'",
                col.qualified(),
                binds.bind(&Value::String(pattern.clone()))
            ),
            Expr::Not(inner) => Self::render_negated(inner, binds),
            Expr::And(items) => match items.len() {
                0 => "1 = 1".to_string(),
                1 => items[0].render(binds),
                _ => {
                    let parts: Vec<String> = items.iter().map(|e| e.render(binds)).collect();
                    format!("({})", parts.join(" AND "))
                }
            },
            Expr::Or(items) => match items.len() {
                0 => "1 != 1".to_string(),
                1 => items[0].render(binds),
                _ => {
                    let parts: Vec<String> = items.iter().map(|e| e.render(binds)).collect();
                    format!("({})", parts.join(" OR "))
                }
            },
        }
    }

    fn render_negated(inner: &Expr, binds: &mut Binds) -> String {
        match inner {
            Expr::Eq(col, Value::Null) => format!("{} IS NOT NULL", col.qualified()),
            Expr::Eq(col, value) => {
                format!("{} != {}", col.qualified(), binds.bind(value))
            }
            Expr::ColumnEq(left, right) => {
                format!("{} != {}", left.qualified(), right.qualified())
            }
            Expr::In(col, values) => match render_list(values, binds) {
                Some(list) => format!("{} NOT IN ({})", col.qualified(), list),
                None => "1 = 1".to_string(),
            },
            Expr::Between(col, low, high) => format!(
                "{} NOT BETWEEN {} AND {}",
                col.qualified(),
                binds.bind(low),
                binds.bind(high)
            ),
            Expr::Like(col, pattern) => format!(
                "{} NOT LIKE {} ESCAPE '\\'",
                col.qualified(),
                binds.bind(&Value::String(pattern.clone()))
            ),
            other => format!("NOT ({})", other.render(binds)),
        }
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    /// Negate this expression. Double negation unwraps.
    fn not(self) -> Expr {
        match self {
            Expr::Not(inner) => *inner,
            other => Expr::Not(Box::new(other)),
        }
    }
}

fn render_list(values: &[Value], binds: &mut Binds) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let parts: Vec<String> = values.iter().map(|v| binds.bind(v)).collect();
    Some(parts.join(", "))
}
