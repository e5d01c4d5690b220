//! Operator registry.
//!
//! Each operator name maps to a function building one predicate from a
//! column and a literal. The built-in table is initialized once and never
//! mutated; callers overlay it per call with an [`OperatorRegistry`] to
//! override a built-in or add domain-specific operators.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use rowfence_model::PlanValue;
use sea_query::{Expr, SimpleExpr, Value};

use crate::attributes::TableColumn;
use crate::error::CompileError;

/// Builds a predicate from a resolved column and the comparison literal.
pub type OperatorFn =
    Arc<dyn Fn(&TableColumn, &PlanValue) -> Result<SimpleExpr, CompileError> + Send + Sync>;

/// Per-call operator overrides and extensions.
///
/// Lookup precedence is override first, then the built-in table. The
/// registry never mutates the built-ins; two concurrent calls with
/// different registries cannot observe each other.
#[derive(Clone, Default)]
pub struct OperatorRegistry {
    entries: HashMap<String, OperatorFn>,
}

impl OperatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operator, replacing any previous entry of that name.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&TableColumn, &PlanValue) -> Result<SimpleExpr, CompileError>
            + Send
            + Sync
            + 'static,
    {
        self.entries.insert(name.into(), Arc::new(f));
    }

    /// Registers an operator, consuming and returning the registry for
    /// chaining.
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&TableColumn, &PlanValue) -> Result<SimpleExpr, CompileError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, f);
        self
    }

    /// Looks up an operator by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OperatorFn> {
        self.entries.get(name)
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("OperatorRegistry")
            .field("operators", &names)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in operators
// ---------------------------------------------------------------------------

static DEFAULT_OPERATORS: LazyLock<HashMap<&'static str, OperatorFn>> = LazyLock::new(|| {
    let mut map: HashMap<&'static str, OperatorFn> = HashMap::new();
    map.insert("eq", Arc::new(op_eq));
    map.insert("ne", Arc::new(op_ne));
    map.insert("lt", Arc::new(op_lt));
    map.insert("gt", Arc::new(op_gt));
    // Both spellings appear in the wild.
    map.insert("le", Arc::new(op_le));
    map.insert("lte", Arc::new(op_le));
    map.insert("ge", Arc::new(op_ge));
    map.insert("gte", Arc::new(op_ge));
    map.insert("in", Arc::new(op_in));
    map.insert("contains", Arc::new(op_contains));
    map.insert("startsWith", Arc::new(op_starts_with));
    map.insert("starts_with", Arc::new(op_starts_with));
    map.insert("endsWith", Arc::new(op_ends_with));
    map.insert("ends_with", Arc::new(op_ends_with));
    map.insert("isSet", Arc::new(op_is_set));
    map.insert("is_set", Arc::new(op_is_set));
    map
});

/// Looks up a built-in operator by name.
#[must_use]
pub fn default_operator(name: &str) -> Option<OperatorFn> {
    DEFAULT_OPERATORS.get(name).cloned()
}

/// Resolves an operator name against the overrides, then the built-ins.
pub(crate) fn resolve(
    name: &str,
    overrides: Option<&OperatorRegistry>,
) -> Result<OperatorFn, CompileError> {
    if let Some(f) = overrides.and_then(|ops| ops.get(name)) {
        return Ok(f.clone());
    }
    DEFAULT_OPERATORS
        .get(name)
        .cloned()
        .ok_or_else(|| CompileError::UnrecognisedOperator(name.to_owned()))
}

/// A predicate that can never match, used for denied plans and empty
/// membership lists.
#[must_use]
pub(crate) fn never_match() -> SimpleExpr {
    Expr::val(1).eq(0)
}

/// Converts a plan literal into a query value.
pub(crate) fn scalar(value: &PlanValue) -> Result<Value, CompileError> {
    match value {
        PlanValue::Null => Ok(Value::BigInt(None)),
        PlanValue::Bool(b) => Ok((*b).into()),
        PlanValue::Int(n) => Ok((*n).into()),
        PlanValue::Float(n) => Ok((*n).into()),
        PlanValue::String(s) => Ok(s.clone().into()),
        PlanValue::List(_) => Err(CompileError::ScalarExpected),
    }
}

fn op_eq(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    if value.is_null() {
        return Ok(col.expr().is_null());
    }
    Ok(col.expr().eq(scalar(value)?))
}

fn op_ne(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    if value.is_null() {
        return Ok(col.expr().is_not_null());
    }
    Ok(col.expr().ne(scalar(value)?))
}

fn op_lt(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    Ok(col.expr().lt(scalar(value)?))
}

fn op_gt(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    Ok(col.expr().gt(scalar(value)?))
}

fn op_le(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    Ok(col.expr().lte(scalar(value)?))
}

fn op_ge(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    Ok(col.expr().gte(scalar(value)?))
}

fn op_in(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    // A scalar right-hand side reads as a one-element list.
    let items = match value {
        PlanValue::List(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    };
    if items.is_empty() {
        return Ok(never_match());
    }
    let values = items.iter().map(scalar).collect::<Result<Vec<_>, _>>()?;
    Ok(col.expr().is_in(values))
}

fn op_contains(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    let Some(s) = value.as_str() else {
        return Err(CompileError::InvalidOperandType {
            operator: "contains",
            expected: "string",
        });
    };
    Ok(col.expr().like(format!("%{s}%")))
}

fn op_starts_with(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    let Some(s) = value.as_str() else {
        return Err(CompileError::InvalidOperandType {
            operator: "startsWith",
            expected: "string",
        });
    };
    Ok(col.expr().like(format!("{s}%")))
}

fn op_ends_with(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    let Some(s) = value.as_str() else {
        return Err(CompileError::InvalidOperandType {
            operator: "endsWith",
            expected: "string",
        });
    };
    Ok(col.expr().like(format!("%{s}")))
}

fn op_is_set(col: &TableColumn, value: &PlanValue) -> Result<SimpleExpr, CompileError> {
    let Some(set) = value.as_bool() else {
        return Err(CompileError::InvalidOperandType {
            operator: "isSet",
            expected: "boolean",
        });
    };
    Ok(if set {
        col.expr().is_not_null()
    } else {
        col.expr().is_null()
    })
}
