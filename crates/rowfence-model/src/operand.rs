//! Condition AST operands.
//!
//! A plan condition is a tree of single-purpose JSON objects. Each node
//! carries exactly one of three payloads: a nested expression
//! (`{"expression": {...}}`), an attribute reference (`{"variable": "..."}`,
//! spelled `{"name": "..."}` by one SDK), or a literal (`{"value": ...}`).
//! Some producers emit the operator object directly without the
//! `expression` wrapper; both spellings decode to [`PlanOperand::Expression`],
//! so consumers only ever see the canonical form.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::PlanValue;

/// An operator application: `{"operator": "eq", "operands": [...]}`.
///
/// Logical operators (`and`, `or`, `not`) take expression operands;
/// comparison operators take exactly one variable and one value operand,
/// in either order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExpression {
    /// Operator name. An open set; the compiler decides what it knows.
    pub operator: String,
    /// Child operands. Absent on the wire when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operands: Vec<PlanOperand>,
}

impl PlanExpression {
    /// Creates an expression node.
    pub fn new(operator: impl Into<String>, operands: Vec<PlanOperand>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }
}

/// One node of a plan condition.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOperand {
    /// An operator application.
    Expression(PlanExpression),
    /// A reference to a resource attribute, e.g.
    /// `request.resource.attr.ownedBy`.
    Variable(String),
    /// A literal to compare against.
    Value(PlanValue),
}

impl PlanOperand {
    /// Creates an expression operand.
    pub fn expression(operator: impl Into<String>, operands: Vec<PlanOperand>) -> Self {
        Self::Expression(PlanExpression::new(operator, operands))
    }

    /// Creates a variable operand.
    pub fn variable(path: impl Into<String>) -> Self {
        Self::Variable(path.into())
    }

    /// Creates a value operand.
    pub fn value(value: impl Into<PlanValue>) -> Self {
        Self::Value(value.into())
    }

    /// Returns the attribute path if this is a variable operand.
    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(path) => Some(path),
            _ => None,
        }
    }

    /// Returns the literal if this is a value operand.
    #[must_use]
    pub fn as_value(&self) -> Option<&PlanValue> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Short node-shape name used in diagnostics.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Expression(_) => "expression",
            Self::Variable(_) => "variable",
            Self::Value(_) => "value",
        }
    }
}

impl fmt::Display for PlanOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => {
                write!(f, "({}", expr.operator)?;
                for operand in &expr.operands {
                    write!(f, " {operand}")?;
                }
                f.write_str(")")
            }
            Self::Variable(path) => f.write_str(path),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for PlanOperand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Expression(expr) => map.serialize_entry("expression", expr)?,
            Self::Variable(path) => map.serialize_entry("variable", path)?,
            Self::Value(value) => map.serialize_entry("value", value)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PlanOperand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OperandVisitor)
    }
}

struct OperandVisitor;

impl<'de> Visitor<'de> for OperandVisitor {
    type Value = PlanOperand;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(
            "an operand object carrying `expression`, `variable`/`name`, `value`, \
             or an inline `operator`/`operands` pair",
        )
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let mut expression: Option<PlanExpression> = None;
        let mut variable: Option<String> = None;
        let mut value: Option<PlanValue> = None;
        let mut operator: Option<String> = None;
        let mut operands: Option<Vec<PlanOperand>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "expression" => expression = Some(map.next_value()?),
                "variable" | "name" => variable = Some(map.next_value()?),
                "value" => value = Some(map.next_value()?),
                "operator" => operator = Some(map.next_value()?),
                "operands" => operands = Some(map.next_value()?),
                other => {
                    return Err(de::Error::unknown_field(
                        other,
                        &["expression", "variable", "name", "value", "operator", "operands"],
                    ));
                }
            }
        }

        match (expression, variable, value, operator) {
            (Some(expr), None, None, None) => Ok(PlanOperand::Expression(expr)),
            (None, Some(path), None, None) => Ok(PlanOperand::Variable(path)),
            (None, None, Some(value), None) => Ok(PlanOperand::Value(value)),
            // Inline operator object without the `expression` wrapper.
            (None, None, None, Some(operator)) => Ok(PlanOperand::Expression(PlanExpression {
                operator,
                operands: operands.unwrap_or_default(),
            })),
            _ => Err(de::Error::custom(
                "operand must carry exactly one of `expression`, `variable`, `value`, \
                 or an `operator` with its `operands`",
            )),
        }
    }
}
