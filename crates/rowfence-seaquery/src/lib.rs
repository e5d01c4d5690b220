//! Compiles policy-engine resources query plans into sea-query predicates.
//!
//! A policy engine answers "which instances of this resource may the
//! principal act on?" with a query plan: allow everything, deny
//! everything, or a condition tree over resource attributes. This crate
//! turns such a plan into a [`sea_query::Condition`] (or a whole select
//! statement) so the database does the filtering.
//!
//! # Overview
//!
//! The caller supplies an [`AttributeMap`] from attribute paths (as they
//! appear in policy conditions) to the table columns backing them. The
//! compiler walks the condition tree, resolves each comparison operator
//! against a built-in table (optionally overridden per call through an
//! [`OperatorRegistry`]), and folds the results back together with the
//! plan's `and`/`or`/`not` connectives. Plans that deny access, carry no
//! filter, or report an unrecognized kind all produce a predicate that
//! never matches, so the outcome fails closed.
//!
//! # Usage
//!
//! ```rust
//! use rowfence_model::QueryPlan;
//! use rowfence_seaquery::{AttributeMap, TableColumn, plan_to_select};
//! use sea_query::SqliteQueryBuilder;
//!
//! let plan = QueryPlan::from_json(
//!     r#"{
//!         "filter": {
//!             "kind": "KIND_CONDITIONAL",
//!             "condition": {
//!                 "expression": {
//!                     "operator": "eq",
//!                     "operands": [
//!                         {"variable": "request.resource.attr.ownedBy"},
//!                         {"value": "user-1"}
//!                     ]
//!                 }
//!             }
//!         }
//!     }"#,
//! )
//! .unwrap();
//!
//! let attrs = AttributeMap::new().with(
//!     "request.resource.attr.ownedBy",
//!     TableColumn::new("resource", "ownedBy"),
//! );
//! let query = plan_to_select(&plan, "resource", &attrs, None, &[]).unwrap();
//! assert_eq!(
//!     query.to_string(SqliteQueryBuilder),
//!     r#"SELECT "resource".* FROM "resource" WHERE "resource"."ownedBy" = 'user-1'"#
//! );
//! ```
//!
//! # Modules
//!
//! - [`attributes`] - Attribute-path to table-column mapping
//! - [`compiler`] - Recursive condition-tree compilation
//! - [`error`] - Compilation error types
//! - [`operators`] - Built-in comparison operators and per-call overrides
//! - [`query`] - Plan dispatch and select-statement assembly

pub mod attributes;
pub mod compiler;
pub mod error;
pub mod operators;
pub mod query;

pub use attributes::{AttributeMap, TableColumn};
pub use compiler::compile_condition;
pub use error::CompileError;
pub use operators::{OperatorFn, OperatorRegistry, default_operator};
pub use query::{JoinClause, plan_to_predicate, plan_to_select};
