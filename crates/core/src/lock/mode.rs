//! Lock modes of the multi-granularity locking protocol and the decisions a
//! lock manager takes over them.
//!
//! Compatibility and substitutability are not tabulated per cell. Each mode is
//! described by a small bit set:
//!
//! - its *components*: the basic modes it is made of (`SIX` is `S` plus `IX`,
//!   `NL` is made of nothing). Two modes are compatible iff no component of one
//!   conflicts with a component of the other.
//! - its *rights*: every basic mode it entitles the holder to act as. A held
//!   mode substitutes for a required one iff it has all of its rights.

use alloc::string::ToString;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

use crate::lock::error::{Error, InvalidMode};

mod basic {
    pub const IS: u8 = 1 << 0;
    pub const IX: u8 = 1 << 1;
    pub const S: u8 = 1 << 2;
    pub const X: u8 = 1 << 3;

    /// `CONFLICTS[i]` is the set of basic modes conflicting with basic mode `1 << i`.
    /// Symmetric: `b` is in `CONFLICTS[a]` iff `a` is in `CONFLICTS[b]`.
    pub const CONFLICTS: [u8; 4] = [X, S | X, IX | X, IS | IX | S | X];
}

/// One of the six lock modes a transaction can hold on a resource.
///
/// Variants are declared weakest first; the declaration order is a linear
/// extension of the substitutability order and defines [`LockMode::index`].
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LockMode {
    /// `NL`: no lock held.
    #[cfg_attr(feature = "serde", serde(rename = "NL"))]
    NoLock = 0,
    /// `IS`: intent to take shared locks below.
    #[cfg_attr(feature = "serde", serde(rename = "IS"))]
    IntentionShared = 1,
    /// `IX`: intent to take exclusive locks below.
    #[cfg_attr(feature = "serde", serde(rename = "IX"))]
    IntentionExclusive = 2,
    /// `S`: shared access to the whole subtree.
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    Shared = 3,
    /// `SIX`: shared access to the subtree plus intent to write below.
    #[cfg_attr(feature = "serde", serde(rename = "SIX"))]
    SharedIntentionExclusive = 4,
    /// `X`: exclusive access to the whole subtree.
    #[cfg_attr(feature = "serde", serde(rename = "X"))]
    Exclusive = 5,
}

impl LockMode {
    /// All modes, weakest first.
    pub const ALL: [Self; 6] = [
        Self::NoLock,
        Self::IntentionShared,
        Self::IntentionExclusive,
        Self::Shared,
        Self::SharedIntentionExclusive,
        Self::Exclusive,
    ];

    /// Canonical short name, as used in logs and diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoLock => "NL",
            Self::IntentionShared => "IS",
            Self::IntentionExclusive => "IX",
            Self::Shared => "S",
            Self::SharedIntentionExclusive => "SIX",
            Self::Exclusive => "X",
        }
    }

    /// Position of the mode in [`LockMode::ALL`].
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`LockMode::index`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] if `index` is not below `6`.
    pub fn from_index(index: u8) -> Result<Self, Error> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(Error::InvalidMode(InvalidMode::Index(index)))
    }

    const fn components(self) -> u8 {
        match self {
            Self::NoLock => 0,
            Self::IntentionShared => basic::IS,
            Self::IntentionExclusive => basic::IX,
            Self::Shared => basic::S,
            Self::SharedIntentionExclusive => basic::S | basic::IX,
            Self::Exclusive => basic::X,
        }
    }

    const fn rights(self) -> u8 {
        match self {
            Self::NoLock => 0,
            Self::IntentionShared => basic::IS,
            Self::IntentionExclusive => basic::IS | basic::IX,
            Self::Shared => basic::IS | basic::S,
            Self::SharedIntentionExclusive => basic::IS | basic::IX | basic::S,
            Self::Exclusive => basic::IS | basic::IX | basic::S | basic::X,
        }
    }

    /// Whether one transaction may hold `self` while another holds `other` on
    /// the same resource.
    #[must_use]
    pub const fn compatible_with(self, other: Self) -> bool {
        let ours = self.components();
        let theirs = other.components();
        let mut bit = 0;
        while bit < basic::CONFLICTS.len() {
            if ours & (1 << bit) != 0 && basic::CONFLICTS[bit] & theirs != 0 {
                return false;
            }
            bit += 1;
        }
        true
    }

    /// Whether `self` may be granted while other transactions hold `held`.
    #[must_use]
    pub fn compatible_with_all<I>(self, held: I) -> bool
    where
        I: IntoIterator<Item = Self>,
    {
        held.into_iter().all(|other| self.compatible_with(other))
    }

    /// The mode that must be held on the parent resource before `self` can be
    /// granted on a child.
    ///
    /// Full locks only ever need intent on the parent.
    #[must_use]
    pub const fn parent_lock(self) -> Self {
        match self {
            Self::NoLock => Self::NoLock,
            Self::IntentionShared | Self::Shared => Self::IntentionShared,
            Self::IntentionExclusive | Self::SharedIntentionExclusive | Self::Exclusive => {
                Self::IntentionExclusive
            }
        }
    }

    /// Whether holding `self` on a parent resource permits a transaction to be
    /// granted `child` on a child resource.
    ///
    /// Only intent modes authorize locking below. `SIX` already reads the whole
    /// subtree, so it does not permit a plain `S` or `IS` child.
    #[must_use]
    pub const fn can_be_parent_of(self, child: Self) -> bool {
        match self {
            Self::NoLock | Self::Shared | Self::Exclusive => matches!(child, Self::NoLock),
            Self::IntentionShared => matches!(
                child,
                Self::NoLock | Self::IntentionShared | Self::Shared
            ),
            Self::IntentionExclusive => true,
            Self::SharedIntentionExclusive => matches!(
                child,
                Self::NoLock
                    | Self::IntentionExclusive
                    | Self::SharedIntentionExclusive
                    | Self::Exclusive
            ),
        }
    }

    /// Whether holding `self` already satisfies a request for `required`.
    #[must_use]
    pub const fn substitutes_for(self, required: Self) -> bool {
        required.rights() & !self.rights() == 0
    }

    /// Whether `self` substitutes for `other` and is a different mode.
    #[must_use]
    pub const fn is_stronger_than(self, other: Self) -> bool {
        self.substitutes_for(other) && self.index() != other.index()
    }

    /// The weakest mode that substitutes for both `self` and `other`.
    ///
    /// This is the mode to promote to when a transaction holding `self` also
    /// needs `other`, e.g. `S` joined with `IX` is `SIX`.
    #[must_use]
    pub const fn join(self, other: Self) -> Self {
        // ALL is a linear extension of the order, so the first upper bound is the least.
        let mut i = 0;
        while i < Self::ALL.len() {
            let candidate = Self::ALL[i];
            if candidate.substitutes_for(self) && candidate.substitutes_for(other) {
                return candidate;
            }
            i += 1;
        }
        Self::Exclusive
    }

    /// `IS`, `IX` and `SIX`.
    #[must_use]
    pub const fn is_intent(self) -> bool {
        matches!(
            self,
            Self::IntentionShared | Self::IntentionExclusive | Self::SharedIntentionExclusive
        )
    }
}

/// See [`LockMode::compatible_with`].
#[must_use]
pub const fn compatible(a: LockMode, b: LockMode) -> bool {
    a.compatible_with(b)
}

/// See [`LockMode::parent_lock`].
#[must_use]
pub const fn parent_lock(mode: LockMode) -> LockMode {
    mode.parent_lock()
}

/// See [`LockMode::can_be_parent_of`].
#[must_use]
pub const fn can_be_parent_lock(parent: LockMode, child: LockMode) -> bool {
    parent.can_be_parent_of(child)
}

/// See [`LockMode::substitutes_for`].
#[must_use]
pub const fn substitutable(held: LockMode, required: LockMode) -> bool {
    held.substitutes_for(required)
}

impl Display for LockMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(self.as_str())
    }
}

impl FromStr for LockMode {
    type Err = Error;

    /// Parses a canonical name. Case-sensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| InvalidMode::Name(name.to_string()).into())
    }
}

impl TryFrom<u8> for LockMode {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl From<LockMode> for u8 {
    fn from(mode: LockMode) -> Self {
        mode.index()
    }
}
