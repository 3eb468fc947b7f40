use alloc::string::String;
use core::fmt::{Display, Formatter, Result};

use derive_more::From;

use crate::lock::mode::LockMode;
use crate::lock::table::Relation;

/// A lock mode value that does not name one of the six modes.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMode {
    /// Not one of the canonical names `NL`, `IS`, `IX`, `S`, `SIX`, `X`.
    Name(String),
    /// Outside the index range `0..6`.
    Index(u8),
}

/// Error returned at the boundaries where a lock mode enters from untyped input,
/// and by lock path checks.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Error {
    /// The value is not a lock mode. Never recovered by defaulting to some mode.
    InvalidMode(InvalidMode),
    /// `parent` does not permit `child` directly below it.
    /// `depth` is the position of the child in the root-to-leaf path.
    InvalidHierarchy {
        depth: usize,
        parent: LockMode,
        child: LockMode,
    },
    /// An ancestor plan was requested for more than `max` ancestors.
    PlanTooDeep { depth: usize, max: u8 },
    /// A decision table whose modes or cells differ from what `relation` gives.
    InconsistentTable { relation: Relation },
}

impl Display for InvalidMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Name(name) => write!(f, "invalid lock mode name {name:?}"),
            Self::Index(index) => write!(
                f,
                "invalid lock mode index {index} (expected 0..{})",
                LockMode::ALL.len()
            ),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidMode(invalid) => invalid.fmt(f),
            Self::InvalidHierarchy {
                depth,
                parent,
                child,
            } => write!(
                f,
                "{parent} cannot be held above {child} (at depth {depth})"
            ),
            Self::PlanTooDeep { depth, max } => write!(
                f,
                "cannot plan {depth} ancestors (at most {max} supported)"
            ),
            Self::InconsistentTable { relation } => {
                write!(f, "table does not match the {relation} relation")
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_invalid_name_message() {
        let err = Error::from(InvalidMode::Name("SX".to_string()));
        assert_eq!(err.to_string(), "invalid lock mode name \"SX\"");
    }

    #[test]
    fn test_invalid_index_message() {
        let err = Error::from(InvalidMode::Index(9));
        assert_eq!(
            err.to_string(),
            "invalid lock mode index 9 (expected 0..6)"
        );
    }

    #[test]
    fn test_invalid_hierarchy_message() {
        let err = Error::InvalidHierarchy {
            depth: 2,
            parent: LockMode::IntentionShared,
            child: LockMode::Exclusive,
        };
        assert_eq!(err.to_string(), "IS cannot be held above X (at depth 2)");
    }

    #[test]
    fn test_plan_too_deep_message() {
        let err = Error::PlanTooDeep { depth: 65, max: 64 };
        assert_eq!(
            err.to_string(),
            "cannot plan 65 ancestors (at most 64 supported)"
        );
    }

    #[test]
    fn test_inconsistent_table_message() {
        let err = Error::InconsistentTable {
            relation: Relation::CanBeParent,
        };
        assert_eq!(
            err.to_string(),
            "table does not match the can-be-parent relation"
        );
    }
}
