//! Checks over the locks one transaction holds along a root-to-leaf path of
//! the resource hierarchy (e.g. database, table, page, row).

use alloc::vec;
use alloc::vec::Vec;

use crate::lock::error::Error;
use crate::lock::mode::LockMode;

/// Check that every mode in `path` is permitted by the mode held directly
/// above it. `path[0]` is the mode held on the root.
///
/// # Errors
///
/// Returns [`Error::InvalidHierarchy`] for the first `(parent, child)` pair,
/// from the root down, where `parent` does not permit `child`.
pub fn validate_path(path: &[LockMode]) -> Result<(), Error> {
    for (depth, pair) in (1..).zip(path.windows(2)) {
        let (parent, child) = (pair[0], pair[1]);
        if !parent.can_be_parent_of(child) {
            tracing::debug!(depth, %parent, %child, "lock path rejected");
            return Err(Error::InvalidHierarchy {
                depth,
                parent,
                child,
            });
        }
    }
    tracing::trace!(len = path.len(), "lock path accepted");
    Ok(())
}

/// Deepest ancestor chain [`ancestor_plan`] will build.
pub const MAX_DEPTH: u8 = 64;

/// Modes to hold on each of the `depth` ancestors, root first, before `mode`
/// can be granted `depth` levels below the root.
///
/// Appending `mode` to the plan always gives a path accepted by
/// [`validate_path`].
///
/// # Errors
///
/// Returns [`Error::PlanTooDeep`] if `depth` exceeds [`MAX_DEPTH`]; nothing is
/// allocated in that case.
pub fn ancestor_plan(mode: LockMode, depth: usize) -> Result<Vec<LockMode>, Error> {
    if depth > usize::from(MAX_DEPTH) {
        tracing::debug!(%mode, depth, max = MAX_DEPTH, "ancestor plan too deep");
        return Err(Error::PlanTooDeep {
            depth,
            max: MAX_DEPTH,
        });
    }
    let mut plan = vec![LockMode::NoLock; depth];
    let mut below = mode;
    for ancestor in plan.iter_mut().rev() {
        *ancestor = below.parent_lock();
        below = *ancestor;
    }
    tracing::trace!(%mode, depth, ?plan, "ancestor plan");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NL: LockMode = LockMode::NoLock;
    const IS: LockMode = LockMode::IntentionShared;
    const IX: LockMode = LockMode::IntentionExclusive;
    const S: LockMode = LockMode::Shared;
    const SIX: LockMode = LockMode::SharedIntentionExclusive;
    const X: LockMode = LockMode::Exclusive;

    #[test]
    fn test_short_paths_valid() {
        assert_eq!(validate_path(&[]), Ok(()));
        for mode in LockMode::ALL {
            assert_eq!(validate_path(&[mode]), Ok(()));
        }
    }

    #[test]
    fn test_valid_paths() {
        assert_eq!(validate_path(&[IX, IX, X]), Ok(()));
        assert_eq!(validate_path(&[IS, IS, S]), Ok(()));
        assert_eq!(validate_path(&[IX, SIX, X]), Ok(()));
        assert_eq!(validate_path(&[S, NL, NL]), Ok(()));
    }

    #[test]
    fn test_first_violation_reported() {
        assert_eq!(
            validate_path(&[IX, IS, X, S]),
            Err(Error::InvalidHierarchy {
                depth: 2,
                parent: IS,
                child: X,
            })
        );
        assert_eq!(
            validate_path(&[S, IS]),
            Err(Error::InvalidHierarchy {
                depth: 1,
                parent: S,
                child: IS,
            })
        );
    }

    #[test]
    fn test_six_rejects_shared_child() {
        assert_eq!(
            validate_path(&[IX, SIX, S]),
            Err(Error::InvalidHierarchy {
                depth: 2,
                parent: SIX,
                child: S,
            })
        );
    }

    #[test]
    fn test_plan_examples() {
        assert_eq!(ancestor_plan(X, 3), Ok(vec![IX, IX, IX]));
        assert_eq!(ancestor_plan(S, 2), Ok(vec![IS, IS]));
        assert_eq!(ancestor_plan(SIX, 1), Ok(vec![IX]));
        assert_eq!(ancestor_plan(NL, 2), Ok(vec![NL, NL]));
        assert_eq!(ancestor_plan(X, 0), Ok(vec![]));
    }

    #[test]
    fn test_plan_at_max_depth() {
        let plan = ancestor_plan(S, usize::from(MAX_DEPTH)).unwrap();
        assert_eq!(plan.len(), usize::from(MAX_DEPTH));
        assert!(plan.iter().all(|&mode| mode == IS));
    }

    #[test]
    fn test_plan_beyond_max_depth() {
        for depth in [usize::from(MAX_DEPTH) + 1, 1 << 20, usize::MAX] {
            assert_eq!(
                ancestor_plan(X, depth),
                Err(Error::PlanTooDeep {
                    depth,
                    max: MAX_DEPTH,
                })
            );
        }
    }
}
