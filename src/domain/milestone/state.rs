//! MilestoneState enum for tracking the lifecycle of milestones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::StateMachine;

/// Lifecycle state of a milestone.
///
/// Moves strictly forward: `Created -> InProgress -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneState {
    #[default]
    Created,
    InProgress,
    Completed,
}

impl MilestoneState {
    pub const ALL: [MilestoneState; 3] = [
        MilestoneState::Created,
        MilestoneState::InProgress,
        MilestoneState::Completed,
    ];

    /// Returns true if releases may be associated in this state.
    pub fn accepts_releases(&self) -> bool {
        matches!(self, MilestoneState::InProgress)
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneState::Created => "CREATED",
            MilestoneState::InProgress => "IN_PROGRESS",
            MilestoneState::Completed => "COMPLETED",
        }
    }
}

impl StateMachine for MilestoneState {
    fn valid_transitions(&self) -> Vec<Self> {
        use MilestoneState::*;
        match self {
            Created => vec![InProgress],
            InProgress => vec![Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A state name outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown milestone state '{0}'; expected one of CREATED, IN_PROGRESS, COMPLETED")]
pub struct UnknownMilestoneState(pub String);

impl FromStr for MilestoneState {
    type Err = UnknownMilestoneState;

    /// Parses only the canonical names; legacy free-text values such as
    /// "active", "OPEN" or "CLOSED" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(MilestoneState::Created),
            "IN_PROGRESS" => Ok(MilestoneState::InProgress),
            "COMPLETED" => Ok(MilestoneState::Completed),
            other => Err(UnknownMilestoneState(other.to_string())),
        }
    }
}
