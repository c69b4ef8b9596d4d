#![forbid(unsafe_code)]

//! Advisory ownership checks for lockable entries.
//!
//! An entry is either unlocked (`locked_by = None`) or held by exactly one
//! owner. The holder passes every check; repeated lock/unlock calls by the
//! holder are no-ops; everyone else is rejected. There is no lock expiry:
//! a lock persists until the holder releases it.

/// True when `owner` is shut out: the entry is locked and the holder is
/// someone else.
pub fn locked_for(locked_by: Option<&str>, owner: &str) -> bool {
    match locked_by {
        Some(holder) => holder != owner,
        None => false,
    }
}

/// Outcome of a lock attempt against the current holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockTransition {
    /// The row must be stamped with the new holder.
    Acquire,
    /// Already held by the same owner; nothing to write.
    AlreadyHeld,
    /// Held by someone else; the operation must fail.
    Conflict,
}

pub fn lock_transition(locked_by: Option<&str>, owner: &str) -> LockTransition {
    match locked_by {
        None => LockTransition::Acquire,
        Some(holder) if holder == owner => LockTransition::AlreadyHeld,
        Some(_) => LockTransition::Conflict,
    }
}

/// Outcome of an unlock attempt against the current holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockTransition {
    /// The lock columns must be cleared.
    Release,
    /// Already unlocked; nothing to write.
    AlreadyUnlocked,
    /// Held by someone else; the operation must fail.
    Conflict,
}

pub fn unlock_transition(locked_by: Option<&str>, owner: &str) -> UnlockTransition {
    match locked_by {
        None => UnlockTransition::AlreadyUnlocked,
        Some(holder) if holder == owner => UnlockTransition::Release,
        Some(_) => UnlockTransition::Conflict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocked_entry_blocks_nobody() {
        assert!(!locked_for(None, "alice"));
        assert!(!locked_for(Some("alice"), "alice"));
        assert!(locked_for(Some("alice"), "bob"));
    }

    #[test]
    fn lock_transitions() {
        assert_eq!(lock_transition(None, "alice"), LockTransition::Acquire);
        assert_eq!(
            lock_transition(Some("alice"), "alice"),
            LockTransition::AlreadyHeld
        );
        assert_eq!(
            lock_transition(Some("alice"), "bob"),
            LockTransition::Conflict
        );
    }

    #[test]
    fn unlock_transitions() {
        assert_eq!(
            unlock_transition(Some("alice"), "alice"),
            UnlockTransition::Release
        );
        assert_eq!(
            unlock_transition(None, "alice"),
            UnlockTransition::AlreadyUnlocked
        );
        assert_eq!(
            unlock_transition(Some("alice"), "bob"),
            UnlockTransition::Conflict
        );
    }
}
