//! Plan dispatch and select-statement assembly.
//!
//! The dispatcher turns a whole query plan into its predicate: allowed
//! plans need no predicate at all, denied (or unrecognized) plans get one
//! that never matches, and conditional plans go through the compiler.
//! [`plan_to_select`] additionally frames the predicate in a full select
//! statement, joining in any secondary tables the attribute map reaches.

use std::collections::HashSet;

use rowfence_model::{PlanKind, QueryPlan};
use sea_query::{Alias, Asterisk, Condition, JoinType, Query, SelectStatement, SimpleExpr};
use tracing::debug;

use crate::attributes::AttributeMap;
use crate::compiler::compile_condition;
use crate::error::CompileError;
use crate::operators::{OperatorRegistry, never_match};

/// A join reaching a table outside the primary one.
///
/// `on` is the join predicate, typically a column equality built with
/// `Expr::col(...).equals(...)`.
#[derive(Debug, Clone)]
pub struct JoinClause {
    table: String,
    on: SimpleExpr,
}

impl JoinClause {
    /// Creates a join clause for `table` with the given join predicate.
    pub fn new(table: impl Into<String>, on: impl Into<SimpleExpr>) -> Self {
        Self {
            table: table.into(),
            on: on.into(),
        }
    }

    /// The joined table's name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The join predicate.
    #[must_use]
    pub fn on(&self) -> &SimpleExpr {
        &self.on
    }
}

/// Turns a query plan into a `WHERE` predicate.
///
/// Returns `Ok(None)` when the plan admits everything, i.e. the caller
/// should omit the `WHERE` clause entirely. Denied plans and plans with
/// a missing or unrecognized kind yield a predicate that never matches,
/// so unknown outcomes always fail closed.
///
/// # Errors
///
/// Returns [`CompileError`] if the plan is conditional and its condition
/// cannot be compiled.
pub fn plan_to_predicate(
    plan: &QueryPlan,
    attrs: &AttributeMap,
    overrides: Option<&OperatorRegistry>,
) -> Result<Option<Condition>, CompileError> {
    match plan.kind() {
        PlanKind::AlwaysAllowed => {
            debug!(
                request_id = plan.request_id.as_deref(),
                resource_kind = plan.resource_kind.as_deref(),
                "plan admits everything; no predicate emitted"
            );
            Ok(None)
        }
        PlanKind::AlwaysDenied | PlanKind::Unspecified => {
            debug!(
                request_id = plan.request_id.as_deref(),
                kind = %plan.kind(),
                "plan admits nothing; emitting never-matching predicate"
            );
            Ok(Some(Condition::all().add(never_match())))
        }
        PlanKind::Conditional => {
            let condition = plan.condition().ok_or(CompileError::MissingCondition)?;
            let compiled = compile_condition(condition, attrs, overrides)?;
            debug!(
                request_id = plan.request_id.as_deref(),
                resource_kind = plan.resource_kind.as_deref(),
                "compiled conditional plan"
            );
            Ok(Some(compiled))
        }
    }
}

/// Builds a full select statement for the plan against `table`.
///
/// Selects `table.*`. Conditional plans whose attribute map reaches
/// other tables require a [`JoinClause`] per secondary table; the check
/// runs before compilation and names every unaccounted-for table.
/// Allowed and denied plans short-circuit without touching the joins.
///
/// # Errors
///
/// Returns [`CompileError`] on missing joins or any compilation failure.
pub fn plan_to_select(
    plan: &QueryPlan,
    table: &str,
    attrs: &AttributeMap,
    overrides: Option<&OperatorRegistry>,
    joins: &[JoinClause],
) -> Result<SelectStatement, CompileError> {
    if plan.kind() == PlanKind::Conditional {
        validate_joins(table, attrs, joins)?;
    }

    let mut query = Query::select();
    query
        .column((Alias::new(table), Asterisk))
        .from(Alias::new(table));

    if let Some(predicate) = plan_to_predicate(plan, attrs, overrides)? {
        query.cond_where(predicate);
    }
    if plan.kind() == PlanKind::Conditional {
        for join in joins {
            query.join(
                JoinType::InnerJoin,
                Alias::new(join.table()),
                join.on().clone(),
            );
        }
    }

    debug!(table, join_count = joins.len(), "built select statement for plan");
    Ok(query)
}

/// Checks that every secondary table reached by the attribute map has a
/// supplied join.
fn validate_joins(
    primary: &str,
    attrs: &AttributeMap,
    joins: &[JoinClause],
) -> Result<(), CompileError> {
    let supplied: HashSet<&str> = joins.iter().map(JoinClause::table).collect();
    let missing: Vec<String> = attrs
        .tables()
        .into_iter()
        .filter(|t| *t != primary && !supplied.contains(t))
        .map(str::to_owned)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CompileError::MissingJoins(missing))
    }
}
