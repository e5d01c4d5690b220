//! Plan filter kinds.
//!
//! The engine reports one of three outcomes per plan. Both wire spellings
//! are accepted: the SDK form (`"ALWAYS_ALLOWED"`) and the protobuf JSON
//! form (`"KIND_ALWAYS_ALLOWED"`). Anything else decodes to
//! [`PlanKind::Unspecified`], which downstream code treats as a denial.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome kind of a resources query plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlanKind {
    /// Every instance of the resource is permitted; no filtering needed.
    AlwaysAllowed,
    /// No instance is permitted.
    AlwaysDenied,
    /// Permission depends on the attached condition.
    Conditional,
    /// Missing or unrecognized kind. Treated as a denial.
    #[default]
    Unspecified,
}

impl PlanKind {
    /// Parses a wire kind string, accepting both encodings.
    ///
    /// Unknown strings map to [`PlanKind::Unspecified`] rather than
    /// failing, so that a newer engine never silently widens access.
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        match s {
            "ALWAYS_ALLOWED" | "KIND_ALWAYS_ALLOWED" => Self::AlwaysAllowed,
            "ALWAYS_DENIED" | "KIND_ALWAYS_DENIED" => Self::AlwaysDenied,
            "CONDITIONAL" | "KIND_CONDITIONAL" => Self::Conditional,
            _ => Self::Unspecified,
        }
    }

    /// Canonical wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlwaysAllowed => "ALWAYS_ALLOWED",
            Self::AlwaysDenied => "ALWAYS_DENIED",
            Self::Conditional => "CONDITIONAL",
            Self::Unspecified => "KIND_UNSPECIFIED",
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlanKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlanKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&s))
    }
}
