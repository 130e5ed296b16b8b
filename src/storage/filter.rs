// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Structured filter and update documents.
//!
//! A [`Filter`] is a conjunction of `(field, operator, value)` conditions
//! evaluated against the JSON form of a stored document. An [`Update`] is a
//! list of `$set`/`$push` operations applied to that JSON form.
//!
//! String values that both parse as RFC 3339 timestamps are compared as
//! instants, so `2024-06-01T00:00:00Z` and `2024-06-01T00:00:00.500Z` order
//! correctly even though their text does not.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::IntoParams;

use super::{StorageError, StorageResult};

/// Default page size for list queries.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Upper bound on page size.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A single `(field, operator, value)` predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub op: Op,
    pub value: Value,
}

impl Condition {
    fn matches(&self, document: &Value) -> bool {
        let actual = document.get(&self.field).unwrap_or(&Value::Null);
        match self.op {
            Op::Eq => actual == &self.value,
            Op::Ne => actual != &self.value,
            Op::Gt => compare(actual, &self.value) == Some(Ordering::Greater),
            Op::Gte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Op::Lt => compare(actual, &self.value) == Some(Ordering::Less),
            Op::Lte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

/// Order two JSON scalars. Mismatched or non-scalar types are unordered.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => match (parse_instant(a), parse_instant(b)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => Some(a.cmp(b)),
        },
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn parse_instant(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Conjunction of conditions. The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary condition.
    pub fn with(mut self, field: impl Into<String>, op: Op, value: Value) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            op,
            value,
        });
        self
    }

    pub fn eq(self, field: impl Into<String>, value: Value) -> Self {
        self.with(field, Op::Eq, value)
    }

    pub fn ne(self, field: impl Into<String>, value: Value) -> Self {
        self.with(field, Op::Ne, value)
    }

    pub fn gt(self, field: impl Into<String>, value: Value) -> Self {
        self.with(field, Op::Gt, value)
    }

    pub fn gte(self, field: impl Into<String>, value: Value) -> Self {
        self.with(field, Op::Gte, value)
    }

    pub fn lt(self, field: impl Into<String>, value: Value) -> Self {
        self.with(field, Op::Lt, value)
    }

    pub fn lte(self, field: impl Into<String>, value: Value) -> Self {
        self.with(field, Op::Lte, value)
    }

    /// Filter on the document identifier.
    pub fn by_id(id: &str) -> Self {
        Self::new().eq("id", Value::String(id.to_string()))
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// True if every condition holds for `document`.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }
}

/// One field mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum UpdateOp {
    /// Replace the field value.
    Set { field: String, value: Value },
    /// Append to an array field, creating it when absent.
    Push { field: String, value: Value },
}

/// Ordered list of field mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    ops: Vec<UpdateOp>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.ops.push(UpdateOp::Set {
            field: field.into(),
            value,
        });
        self
    }

    pub fn push(mut self, field: impl Into<String>, value: Value) -> Self {
        self.ops.push(UpdateOp::Push {
            field: field.into(),
            value,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every operation to `document` in order.
    ///
    /// The identifier is immutable; `$push` onto a non-array is rejected.
    pub fn apply(&self, document: &mut Value) -> StorageResult<()> {
        let object = document
            .as_object_mut()
            .ok_or_else(|| StorageError::InvalidUpdate("document is not an object".into()))?;

        for op in &self.ops {
            match op {
                UpdateOp::Set { field, .. } | UpdateOp::Push { field, .. } if field == "id" => {
                    return Err(StorageError::InvalidUpdate("id is immutable".into()));
                }
                UpdateOp::Set { field, value } => {
                    object.insert(field.clone(), value.clone());
                }
                UpdateOp::Push { field, value } => {
                    let slot = object
                        .entry(field.clone())
                        .or_insert_with(|| Value::Array(Vec::new()));
                    match slot {
                        Value::Array(items) => items.push(value.clone()),
                        Value::Null => *slot = Value::Array(vec![value.clone()]),
                        _ => {
                            return Err(StorageError::InvalidUpdate(format!(
                                "{field} is not an array"
                            )))
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Page selection for list queries (`page` is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (max 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Number of documents to skip.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.effective_limit() as u64) as usize
    }

    /// Page size clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_LIMIT) as usize
    }
}
