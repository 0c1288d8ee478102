//! Error types for planning

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("Invalid planner configuration: {0}")]
    InvalidConfig(String),

    /// A single step took more heading samples than allowed without converging.
    #[error("Target selection did not converge after {samples} samples")]
    SelectorStalled { samples: usize },

    /// An attempt accepted the maximum number of waypoints without getting close enough to the end.
    #[error("Planning attempt timed out after {steps} steps")]
    AttemptTimedOut { steps: usize },

    #[error("All {tries} planning attempts timed out")]
    AllAttemptsTimedOut { tries: usize },
}

pub type Result<T> = std::result::Result<T, PlanningError>;
