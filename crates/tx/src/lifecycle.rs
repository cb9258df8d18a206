// Path: crates/tx/src/lifecycle.rs
//! The lifecycle of one transaction.
//!
//! ```text
//! Draft -> Frozen -> Signed -> Submitted -> Accepted | Rejected
//! ```
//!
//! `Signed` may be re-entered to add signatures, and goes straight to
//! `Rejected` when a node refuses the transaction at precheck. Every step
//! goes through [`LifecycleState::transition`], the only place transitions
//! are checked.

use hgsdk_types::error::Error;
use std::fmt;

/// Where a transaction is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Fields may be set. Nothing is serialized yet.
    #[default]
    Draft,
    /// Body bytes are fixed for every target node.
    Frozen,
    /// At least one signature has been attached.
    Signed,
    /// A node accepted the transaction at precheck.
    Submitted,
    /// The receipt reported `SUCCESS`.
    Accepted,
    /// A node or the ledger refused the transaction.
    Rejected,
}

impl LifecycleState {
    /// Lower-case name used in errors and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Frozen => "frozen",
            Self::Signed => "signed",
            Self::Submitted => "submitted",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Whether `self -> to` is a legal step.
    pub fn can_transition(self, to: Self) -> bool {
        use LifecycleState::*;
        matches!(
            (self, to),
            (Draft, Frozen)
                | (Frozen, Signed)
                | (Signed, Signed)
                | (Signed, Submitted)
                | (Signed, Rejected)
                | (Submitted, Accepted)
                | (Submitted, Rejected)
        )
    }

    /// Moves to `to`, or fails with [`Error::InvalidStateTransition`] and
    /// leaves the state unchanged.
    pub fn transition(&mut self, to: Self) -> Result<(), Error> {
        if !self.can_transition(to) {
            return Err(Error::InvalidStateTransition {
                from: self.as_str(),
                to: to.as_str(),
            });
        }
        tracing::trace!(target: "lifecycle", from = self.as_str(), to = to.as_str(), "transition");
        *self = to;
        Ok(())
    }

    /// Whether no further step is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Whether body bytes exist and may no longer change.
    pub fn is_frozen(&self) -> bool {
        !matches!(self, Self::Draft)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut state = LifecycleState::default();
        for next in [
            LifecycleState::Frozen,
            LifecycleState::Signed,
            LifecycleState::Signed,
            LifecycleState::Submitted,
            LifecycleState::Accepted,
        ] {
            state.transition(next).unwrap();
        }
        assert!(state.is_terminal());
    }

    #[test]
    fn test_invalid_transitions_are_rejected_centrally() {
        let mut state = LifecycleState::Draft;
        let err = state.transition(LifecycleState::Submitted).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStateTransition {
                from: "draft",
                to: "submitted"
            }
        ));
        assert_eq!(state, LifecycleState::Draft);

        let mut state = LifecycleState::Accepted;
        assert!(state.transition(LifecycleState::Rejected).is_err());
        assert!(state.transition(LifecycleState::Draft).is_err());

        let mut state = LifecycleState::Frozen;
        assert!(state.transition(LifecycleState::Frozen).is_err());
        assert!(state.transition(LifecycleState::Submitted).is_err());
    }

    #[test]
    fn test_precheck_rejection_from_signed() {
        let mut state = LifecycleState::Signed;
        state.transition(LifecycleState::Rejected).unwrap();
        assert!(state.is_terminal());
        assert!(state.is_frozen());
    }
}
