//! Compilation errors.

/// Errors raised while compiling a plan condition into a predicate.
///
/// Every variant aborts the whole compilation; a plan is either compiled
/// completely or not at all.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A condition referenced an attribute the caller did not map.
    #[error("Attribute does not exist in the attribute column map: {0}")]
    AttributeNotMapped(String),

    /// The operator is neither a built-in nor a caller override.
    #[error("Unrecognised operator: {0}")]
    UnrecognisedOperator(String),

    /// `and`/`or` with an empty operand list.
    #[error("'{0}' operator requires at least one operand")]
    NoOperands(String),

    /// `not` with anything other than exactly one operand.
    #[error("'not' operator requires exactly one operand")]
    MalformedNot,

    /// A comparison whose operands are not one variable and one value.
    #[error("'{0}' operator requires exactly one variable operand and one value operand")]
    MalformedComparison(String),

    /// A bare leaf where a boolean expression was required.
    #[error("Expected an expression operand, found a {0} operand")]
    ExpectedExpression(&'static str),

    /// A plan marked conditional that carries no condition tree.
    #[error("Conditional plan carries no condition")]
    MissingCondition,

    /// Mapped columns span tables the caller supplied no joins for.
    #[error("Join specification missing for table(s): '{}'", .0.join("', '"))]
    MissingJoins(Vec<String>),

    /// A comparison against a list where a scalar was required.
    #[error("Comparison requires a scalar value, found a list")]
    ScalarExpected,

    /// An operator applied to a value of the wrong type.
    #[error("The '{operator}' operator requires a {expected} value")]
    InvalidOperandType {
        /// Operator that rejected the value.
        operator: &'static str,
        /// Expected value type, e.g. "string".
        expected: &'static str,
    },
}
