//! Wire model for policy-engine resources query plans.
//!
//! A query plan tells the caller which resource instances a principal may
//! act on: everything, nothing, or the subset matching a boolean
//! condition over resource attributes. This crate models the plan
//! envelope, the filter kinds, and the condition AST, and normalizes the
//! two JSON encodings the engine family produces (SDK objects and
//! protobuf JSON) into one canonical tree.
//!
//! Compiling a condition into SQL lives in `rowfence-seaquery`; this
//! crate is serde only.

pub mod kind;
pub mod operand;
pub mod plan;
pub mod value;

pub use kind::PlanKind;
pub use operand::{PlanExpression, PlanOperand};
pub use plan::{PlanFilter, QueryPlan};
pub use value::PlanValue;
