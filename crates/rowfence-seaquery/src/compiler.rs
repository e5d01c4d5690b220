//! Recursive condition compiler.
//!
//! Walks the canonical operand tree and builds a `sea_query` condition:
//! logical nodes fold their children with AND/OR/NOT, comparison nodes
//! resolve their variable against the attribute map and apply the
//! operator function to the column and literal.

use rowfence_model::{PlanExpression, PlanOperand};
use sea_query::{Condition, SimpleExpr};

use crate::attributes::AttributeMap;
use crate::error::CompileError;
use crate::operators::{self, OperatorRegistry};

/// Compiles a condition tree into a predicate.
///
/// The tree must be rooted at an expression node; a bare variable or
/// value is not a boolean expression. Compilation fails wholesale on the
/// first unmapped attribute, unknown operator, or malformed node.
///
/// # Errors
///
/// Returns [`CompileError`] describing the offending node.
pub fn compile_condition(
    condition: &PlanOperand,
    attrs: &AttributeMap,
    overrides: Option<&OperatorRegistry>,
) -> Result<Condition, CompileError> {
    match condition {
        PlanOperand::Expression(expr) => compile_expression(expr, attrs, overrides),
        other => Err(CompileError::ExpectedExpression(other.shape())),
    }
}

fn compile_expression(
    expr: &PlanExpression,
    attrs: &AttributeMap,
    overrides: Option<&OperatorRegistry>,
) -> Result<Condition, CompileError> {
    match expr.operator.as_str() {
        "and" => compile_logical(Condition::all(), expr, attrs, overrides),
        "or" => compile_logical(Condition::any(), expr, attrs, overrides),
        "not" => {
            let [inner] = expr.operands.as_slice() else {
                return Err(CompileError::MalformedNot);
            };
            Ok(compile_condition(inner, attrs, overrides)?.not())
        }
        _ => Ok(Condition::all().add(compile_comparison(expr, attrs, overrides)?)),
    }
}

/// Folds `and`/`or` children into the seed condition. Every child must
/// itself be an expression; an empty child list is a malformed plan.
fn compile_logical(
    seed: Condition,
    expr: &PlanExpression,
    attrs: &AttributeMap,
    overrides: Option<&OperatorRegistry>,
) -> Result<Condition, CompileError> {
    if expr.operands.is_empty() {
        return Err(CompileError::NoOperands(expr.operator.clone()));
    }
    expr.operands.iter().try_fold(seed, |cond, operand| {
        Ok(cond.add(compile_condition(operand, attrs, overrides)?))
    })
}

/// Compiles a comparison node.
///
/// The two operands are one variable and one value, in either order;
/// they are matched by shape, never by position.
fn compile_comparison(
    expr: &PlanExpression,
    attrs: &AttributeMap,
    overrides: Option<&OperatorRegistry>,
) -> Result<SimpleExpr, CompileError> {
    let (path, value) = match expr.operands.as_slice() {
        [PlanOperand::Variable(path), PlanOperand::Value(value)]
        | [PlanOperand::Value(value), PlanOperand::Variable(path)] => (path, value),
        _ => return Err(CompileError::MalformedComparison(expr.operator.clone())),
    };

    let column = attrs
        .get(path)
        .ok_or_else(|| CompileError::AttributeNotMapped(path.clone()))?;
    let op = operators::resolve(&expr.operator, overrides)?;
    op(column, value)
}
