//! The binary lock-mode relations laid out as 6x6 tables, for diagnostics.

use core::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "serde")]
use crate::lock::error::Error;
use crate::lock::mode::LockMode;

/// A binary relation over lock modes. The row mode is the first argument.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// [`LockMode::compatible_with`]
    Compatible,
    /// [`LockMode::can_be_parent_of`]
    CanBeParent,
    /// [`LockMode::substitutes_for`]
    Substitutable,
}

impl Relation {
    pub const ALL: [Self; 3] = [Self::Compatible, Self::CanBeParent, Self::Substitutable];

    #[must_use]
    pub const fn evaluate(self, row: LockMode, column: LockMode) -> bool {
        match self {
            Self::Compatible => row.compatible_with(column),
            Self::CanBeParent => row.can_be_parent_of(column),
            Self::Substitutable => row.substitutes_for(column),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Compatible => "compatible",
            Self::CanBeParent => "can-be-parent",
            Self::Substitutable => "substitutable",
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(self.name())
    }
}

/// Every cell of a [`Relation`] over [`LockMode::ALL`].
///
/// Only built by [`DecisionTable::new`], so `cells[i][j]` is always
/// `relation.evaluate(modes[i], modes[j])`. Deserializing checks the same.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDecisionTable"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTable {
    relation: Relation,
    modes: [LockMode; 6],
    cells: [[bool; 6]; 6],
}

impl DecisionTable {
    #[must_use]
    pub fn new(relation: Relation) -> Self {
        let modes = LockMode::ALL;
        let cells = modes.map(|row| modes.map(|column| relation.evaluate(row, column)));
        Self {
            relation,
            modes,
            cells,
        }
    }

    #[must_use]
    pub const fn relation(&self) -> Relation {
        self.relation
    }

    /// Row and column order, always [`LockMode::ALL`].
    #[must_use]
    pub const fn modes(&self) -> &[LockMode; 6] {
        &self.modes
    }

    #[must_use]
    pub const fn cells(&self) -> &[[bool; 6]; 6] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, row: LockMode, column: LockMode) -> bool {
        self.cells[usize::from(row.index())][usize::from(column.index())]
    }
}

/// Unchecked wire form of a [`DecisionTable`].
#[cfg(feature = "serde")]
#[derive(::serde::Deserialize)]
struct RawDecisionTable {
    relation: Relation,
    modes: [LockMode; 6],
    cells: [[bool; 6]; 6],
}

#[cfg(feature = "serde")]
impl TryFrom<RawDecisionTable> for DecisionTable {
    type Error = Error;

    fn try_from(raw: RawDecisionTable) -> Result<Self, Self::Error> {
        let table = Self::new(raw.relation);
        if raw.modes == table.modes && raw.cells == table.cells {
            Ok(table)
        } else {
            tracing::debug!(relation = %raw.relation, "decision table rejected");
            Err(Error::InconsistentTable {
                relation: raw.relation,
            })
        }
    }
}

const ROW_LABEL_WIDTH: usize = 5;
const CELL_WIDTH: usize = 4;

impl Display for DecisionTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:ROW_LABEL_WIDTH$}", "")?;
        for column in self.modes {
            write!(f, "{column:>CELL_WIDTH$}")?;
        }
        writeln!(f)?;
        for (row, cells) in self.modes.iter().zip(self.cells.iter()) {
            write!(f, "{row:<ROW_LABEL_WIDTH$}")?;
            for &cell in cells {
                let mark = if cell { "✓" } else { "✗" };
                write!(f, "{mark:>CELL_WIDTH$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
