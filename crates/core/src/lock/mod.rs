pub mod error;
pub mod hierarchy;
pub mod mode;
pub mod table;

pub use error::Error;
pub use hierarchy::{ancestor_plan, validate_path, MAX_DEPTH};
pub use mode::{can_be_parent_lock, compatible, parent_lock, substitutable, LockMode};
pub use table::{DecisionTable, Relation};
