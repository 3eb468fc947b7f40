//! Lock-type algebra for multi-granularity locking.
//!
//! A lock manager coordinating access to nested resources (database, table,
//! page, row) holds one of six [`LockMode`]s per resource and transaction:
//!
//! - **NL** -- no lock.
//! - **IS** -- intention-shared: shared locks will be taken below.
//! - **IX** -- intention-exclusive: exclusive locks will be taken below.
//! - **S** -- shared access to the whole subtree.
//! - **SIX** -- `S` plus `IX`.
//! - **X** -- exclusive access to the whole subtree.
//!
//! `mgl_core` answers the questions the lock manager asks on every
//! acquisition, release, and escalation:
//!
//! 1. [`compatible`] -- may two transactions hold these modes on one resource?
//! 2. [`parent_lock`] -- what must be held on the parent before granting a mode?
//! 3. [`can_be_parent_lock`] -- does a mode held on the parent permit a mode on
//!    a child?
//! 4. [`substitutable`] -- does a held mode already satisfy a request?
//!
//! All of them are total `const fn`s over the closed [`LockMode`] enum. A mode
//! that does not exist cannot be constructed: untyped input goes through
//! [`FromStr`](core::str::FromStr) or [`TryFrom<u8>`], which reject it with
//! [`Error::InvalidMode`](lock::Error::InvalidMode).
//!
//! ```rust
//! use mgl_core::{compatible, parent_lock, substitutable, LockMode};
//!
//! let six: LockMode = "SIX".parse().unwrap();
//! assert!(compatible(six, LockMode::IntentionShared));
//! assert!(!compatible(six, LockMode::IntentionExclusive));
//! assert_eq!(parent_lock(six), LockMode::IntentionExclusive);
//! assert!(substitutable(six, LockMode::Shared));
//! ```
//!
//! [`lock::hierarchy`] validates the modes one transaction holds along a
//! root-to-leaf path, and [`lock::table`] lays the relations out as tables.
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` on [`LockMode`] (as its
//!   canonical name), [`Relation`], [`Error`](lock::Error) and
//!   [`DecisionTable`]. A table only deserializes if its cells match its
//!   relation.
//! - **`schemars`** -- enables `JsonSchema` on [`LockMode`], [`Relation`],
//!   [`Error`](lock::Error) and [`InvalidMode`](lock::error::InvalidMode).
//!
//! This crate is `no_std` compatible (requires `alloc`).

#![cfg_attr(not(any(test, feature = "schemars")), no_std)]
extern crate alloc;

pub mod lock;

pub use lock::{
    ancestor_plan, can_be_parent_lock, compatible, parent_lock, substitutable, validate_path,
    DecisionTable, LockMode, Relation, MAX_DEPTH,
};
