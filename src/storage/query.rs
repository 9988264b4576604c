//! Deferred query descriptor
//!
//! A [`Query`] accumulates predicates and an order clause as plain data. Nothing
//! is executed until a [`QueryStore`](super::QueryStore) is asked for a page, so
//! the same descriptor can be evaluated in memory or compiled to SQL.

use crate::core::SortDirection;
use serde_json::Value;

/// Comparison operator of a basic predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Exact equality
    Eq,
    /// SQL `LIKE` pattern with `%`/`_` wildcards and `\` as escape character
    Like,
}

impl Operator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Like => "LIKE",
        }
    }
}

/// How a predicate combines with the ones before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boolean {
    And,
    Or,
}

impl Boolean {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Boolean::And => "AND",
            Boolean::Or => "OR",
        }
    }
}

/// One entry of a `WHERE` list
///
/// The `boolean` of the first entry in a list is ignored. Evaluation follows
/// SQL precedence: `AND` binds tighter than `OR`.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub boolean: Boolean,
    pub predicate: Predicate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column <operator> value`
    Basic {
        column: String,
        operator: Operator,
        value: Value,
    },
    /// A parenthesized list of predicates
    Nested(Vec<Where>),
}

/// The single active ordering of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    pub column: String,
    pub direction: SortDirection,
}

/// Deferred query over one table of a store
///
/// # Example
/// ```
/// use datatable::storage::{Query, like_contains};
/// use datatable::core::SortDirection;
///
/// let mut query = Query::table("users").where_eq("active", true);
/// query.where_any_like(&["name", "email"], like_contains("jane"));
/// query.order_by("name", SortDirection::Desc);
///
/// assert_eq!(query.wheres().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    wheres: Vec<Where>,
    order: Option<OrderClause>,
}

impl Query {
    /// Start a query over `table`
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            wheres: Vec::new(),
            order: None,
        }
    }

    /// Builder-style base constraint (`column = value`), ANDed with the rest
    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_where(
            Boolean::And,
            Predicate::Basic {
                column: column.into(),
                operator: Operator::Eq,
                value: value.into(),
            },
        );
        self
    }

    /// Append a predicate
    pub fn push_where(&mut self, boolean: Boolean, predicate: Predicate) -> &mut Self {
        self.wheres.push(Where { boolean, predicate });
        self
    }

    /// Append `(c1 LIKE pattern OR c2 LIKE pattern ...)`, ANDed with prior predicates
    ///
    /// No-op when `columns` is empty.
    pub fn where_any_like(&mut self, columns: &[&str], pattern: impl Into<String>) -> &mut Self {
        if columns.is_empty() {
            return self;
        }

        let pattern = Value::String(pattern.into());
        let group = columns
            .iter()
            .map(|column| Where {
                boolean: Boolean::Or,
                predicate: Predicate::Basic {
                    column: (*column).to_string(),
                    operator: Operator::Like,
                    value: pattern.clone(),
                },
            })
            .collect();

        self.push_where(Boolean::And, Predicate::Nested(group))
    }

    /// Set the order clause, replacing any previous one
    pub fn order_by(&mut self, column: impl Into<String>, direction: SortDirection) -> &mut Self {
        self.order = Some(OrderClause {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn wheres(&self) -> &[Where] {
        &self.wheres
    }

    pub fn order(&self) -> Option<&OrderClause> {
        self.order.as_ref()
    }
}

/// `LIKE` pattern matching `term` as a literal substring
///
/// `%`, `_` and `\` inside the term are escaped with `\`.
pub fn like_contains(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
