//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state transitions
//! on lifecycle enums such as `MilestoneState`.

use std::fmt::Debug;
use thiserror::Error;

/// Rejected move between two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot transition from {from:?} to {to:?}")]
pub struct TransitionError<S: Debug> {
    pub from: S,
    pub to: S,
}

/// Trait for status enums that represent state machines.
///
/// Implementors define the valid edges and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for MilestoneState {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Created => vec![InProgress],
///             InProgress => vec![Completed],
///             Completed => vec![],
///         }
///     }
/// }
///
/// let next = current.transition_to(MilestoneState::InProgress)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError<Self>> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: *self,
                to: target,
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
