//! Plan filter and response envelope.

use serde::{Deserialize, Serialize};

use crate::kind::PlanKind;
use crate::operand::PlanOperand;

/// The filter section of a resources query plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanFilter {
    /// Outcome kind. Missing on the wire decodes as
    /// [`PlanKind::Unspecified`].
    #[serde(default)]
    pub kind: PlanKind,
    /// Condition AST, present only for conditional plans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<PlanOperand>,
}

impl PlanFilter {
    /// A filter that admits everything.
    #[must_use]
    pub fn always_allowed() -> Self {
        Self {
            kind: PlanKind::AlwaysAllowed,
            condition: None,
        }
    }

    /// A filter that admits nothing.
    #[must_use]
    pub fn always_denied() -> Self {
        Self {
            kind: PlanKind::AlwaysDenied,
            condition: None,
        }
    }

    /// A conditional filter with the given condition tree.
    #[must_use]
    pub fn conditional(condition: PlanOperand) -> Self {
        Self {
            kind: PlanKind::Conditional,
            condition: Some(condition),
        }
    }
}

/// A resources query-plan response, as returned by the policy engine.
///
/// Field names follow the protobuf JSON mapping (camelCase); the SDK's
/// snake_case spellings are accepted as aliases. Only the fields the
/// compiler and its log context need are modeled; anything else on the
/// wire is ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Request id echoed back by the engine, if any.
    #[serde(
        default,
        rename = "requestId",
        alias = "request_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_id: Option<String>,
    /// The action the plan was produced for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// The resource kind the plan was produced for.
    #[serde(
        default,
        rename = "resourceKind",
        alias = "resource_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_kind: Option<String>,
    /// Version of the policy that produced the plan.
    #[serde(
        default,
        rename = "policyVersion",
        alias = "policy_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub policy_version: Option<String>,
    /// The filter to apply. A missing filter means nothing is admitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<PlanFilter>,
}

impl QueryPlan {
    /// Wraps a filter into a bare envelope.
    #[must_use]
    pub fn from_filter(filter: PlanFilter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    /// Effective plan kind; an absent filter reads as
    /// [`PlanKind::Unspecified`].
    #[must_use]
    pub fn kind(&self) -> PlanKind {
        self.filter.as_ref().map_or(PlanKind::Unspecified, |f| f.kind)
    }

    /// The condition tree, if the plan carries one.
    #[must_use]
    pub fn condition(&self) -> Option<&PlanOperand> {
        self.filter.as_ref()?.condition.as_ref()
    }

    /// Parses a plan from its JSON encoding (either wire form).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
