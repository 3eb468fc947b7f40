//! mgl CLI -- query the multi-granularity lock-mode algebra.

use std::fmt::{Display, Formatter, Result as FmtResult};

use clap::{Parser, Subcommand, ValueEnum};
use mgl_core::{ancestor_plan, validate_path, LockMode, Relation, MAX_DEPTH};
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "mgl",
    about = "Lock-type algebra for multi-granularity locking"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
    /// Print answers as JSON (one object per line)
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Whether two transactions may hold these modes on one resource
    Compatible(PairArgs),
    /// Mode required on the parent before MODE can be granted on a child
    Parent(ModeArgs),
    /// Whether PARENT held on a parent permits CHILD on a child
    CanBeParent(ParentChildArgs),
    /// Whether holding HELD satisfies a request for REQUIRED
    Substitutable(SubstituteArgs),
    /// Whether MODE is an intention mode (IS, IX, SIX)
    Intent(ModeArgs),
    /// Print the full table of a relation
    Table(TableArgs),
    /// Validate the modes held along a root-to-leaf path
    Validate(ValidateArgs),
    /// Print the modes to hold on each ancestor before granting MODE
    Plan(PlanArgs),
    /// Print the JSON Schema for the `--json` answer format to stdout
    Schema,
}

#[derive(Debug, Parser)]
pub struct ModeArgs {
    /// Lock mode: NL, IS, IX, S, SIX or X
    pub mode: LockMode,
}

#[derive(Debug, Parser)]
pub struct PairArgs {
    pub a: LockMode,
    pub b: LockMode,
}

#[derive(Debug, Parser)]
pub struct ParentChildArgs {
    pub parent: LockMode,
    pub child: LockMode,
}

#[derive(Debug, Parser)]
pub struct SubstituteArgs {
    pub held: LockMode,
    pub required: LockMode,
}

#[derive(Debug, Parser)]
pub struct TableArgs {
    /// Relation to tabulate
    pub relation: RelationArg,
}

#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Modes held from the root down
    #[arg(required = true)]
    pub path: Vec<LockMode>,
}

#[derive(Debug, Parser)]
pub struct PlanArgs {
    pub mode: LockMode,
    /// Number of ancestors above the resource (at most 64)
    #[arg(long, value_parser = clap::value_parser!(u8).range(..=i64::from(MAX_DEPTH)))]
    pub depth: u8,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum RelationArg {
    Compatible,
    CanBeParent,
    Substitutable,
}

impl From<RelationArg> for Relation {
    fn from(relation: RelationArg) -> Self {
        match relation {
            RelationArg::Compatible => Self::Compatible,
            RelationArg::CanBeParent => Self::CanBeParent,
            RelationArg::Substitutable => Self::Substitutable,
        }
    }
}

/// The answer to a single query, as printed by `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "query", rename_all = "kebab-case")]
pub enum Answer {
    Compatible {
        a: LockMode,
        b: LockMode,
        result: bool,
    },
    Parent {
        mode: LockMode,
        result: LockMode,
    },
    CanBeParent {
        parent: LockMode,
        child: LockMode,
        result: bool,
    },
    Substitutable {
        held: LockMode,
        required: LockMode,
        result: bool,
    },
    Intent {
        mode: LockMode,
        result: bool,
    },
    Validate {
        path: Vec<LockMode>,
        ok: bool,
        /// Why the path is invalid, when it is not.
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Plan {
        mode: LockMode,
        depth: usize,
        plan: Vec<LockMode>,
        /// Why no plan could be built.
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Answer {
    /// Answer a query command. `None` for `table` and `schema`, which print
    /// something other than an answer.
    #[must_use]
    pub fn from_command(command: &Command) -> Option<Self> {
        let answer = match command {
            Command::Compatible(PairArgs { a, b }) => Self::Compatible {
                a: *a,
                b: *b,
                result: a.compatible_with(*b),
            },
            Command::Parent(ModeArgs { mode }) => Self::Parent {
                mode: *mode,
                result: mode.parent_lock(),
            },
            Command::CanBeParent(ParentChildArgs { parent, child }) => Self::CanBeParent {
                parent: *parent,
                child: *child,
                result: parent.can_be_parent_of(*child),
            },
            Command::Substitutable(SubstituteArgs { held, required }) => Self::Substitutable {
                held: *held,
                required: *required,
                result: held.substitutes_for(*required),
            },
            Command::Intent(ModeArgs { mode }) => Self::Intent {
                mode: *mode,
                result: mode.is_intent(),
            },
            Command::Validate(ValidateArgs { path }) => Self::validate(path),
            Command::Plan(PlanArgs { mode, depth }) => Self::plan(*mode, usize::from(*depth)),
            Command::Table(_) | Command::Schema => return None,
        };
        Some(answer)
    }

    fn validate(path: &[LockMode]) -> Self {
        let error = validate_path(path).err().as_ref().map(ToString::to_string);
        Self::Validate {
            path: path.to_vec(),
            ok: error.is_none(),
            error,
        }
    }

    fn plan(mode: LockMode, depth: usize) -> Self {
        let (plan, error) = match ancestor_plan(mode, depth) {
            Ok(plan) => (plan, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };
        Self::Plan {
            mode,
            depth,
            plan,
            error,
        }
    }

    /// Whether the answer reports a failed check.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Validate { ok: false, .. } | Self::Plan { error: Some(_), .. }
        )
    }
}

fn write_modes(f: &mut Formatter<'_>, modes: &[LockMode]) -> FmtResult {
    for (i, mode) in modes.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{mode}")?;
    }
    Ok(())
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Compatible { result, .. }
            | Self::CanBeParent { result, .. }
            | Self::Substitutable { result, .. }
            | Self::Intent { result, .. } => write!(f, "{result}"),
            Self::Parent { result, .. } => write!(f, "{result}"),
            Self::Validate { ok: true, .. } => f.write_str("valid"),
            Self::Validate { error, .. } => {
                write!(f, "invalid: {}", error.as_deref().unwrap_or_default())
            }
            Self::Plan {
                error: Some(error), ..
            } => write!(f, "invalid: {error}"),
            Self::Plan { plan, .. } => write_modes(f, plan),
        }
    }
}
