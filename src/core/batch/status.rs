//! Status model for batch requests and their domain jobs
//!
//! Request: `registering -> live -> {done | error | cancelled}`.
//! Domain job: `waiting -> running -> {done | error}`, `cancelled` from any
//! non-terminal state. Terminal job states have no outgoing transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a batch request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchRequestStatus {
    /// Request row exists, domain jobs are being created
    Registering,
    /// Domain jobs exist and are being tested
    Live,
    /// Every domain job reached a terminal state
    Done,
    /// Infrastructure failure while processing the request
    Error,
    /// Cancelled by the owner
    Cancelled,
}

impl BatchRequestStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Cancelled)
    }

    /// Whether the normal flow allows moving to `next`
    ///
    /// Cancellation is handled separately: the cascade overwrites any state,
    /// `done` included, and never consults this table.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Registering, Self::Live)
                | (Self::Registering, Self::Error)
                | (Self::Live, Self::Done)
                | (Self::Live, Self::Error)
                | (Self::Live, Self::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registering => "registering",
            Self::Live => "live",
            Self::Done => "done",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BatchRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BatchRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registering" => Ok(Self::Registering),
            "live" => Ok(Self::Live),
            "done" => Ok(Self::Done),
            "error" => Ok(Self::Error),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid batch request status: {s}")),
        }
    }
}

/// Status of a single domain job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchDomainStatus {
    /// Created, not yet picked up by the test engine
    Waiting,
    /// Test engine is probing the domain
    Running,
    /// Tests finished
    Done,
    /// Tests failed for this domain
    Error,
    /// Cancelled together with its request
    Cancelled,
}

impl BatchDomainStatus {
    pub const ALL: [BatchDomainStatus; 5] = [
        Self::Waiting,
        Self::Running,
        Self::Done,
        Self::Error,
        Self::Cancelled,
    ];

    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Cancelled)
    }

    /// States from which `self` may legally be entered
    pub fn legal_predecessors(&self) -> &'static [BatchDomainStatus] {
        match self {
            Self::Waiting => &[],
            Self::Running => &[Self::Waiting],
            Self::Done | Self::Error => &[Self::Running],
            Self::Cancelled => &[Self::Waiting, Self::Running],
        }
    }

    /// Check the legality table for `self -> next`
    pub fn can_transition_to(&self, next: Self) -> bool {
        next.legal_predecessors().contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Done => "done",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BatchDomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BatchDomainStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "running" => Ok(Self::Running),
            "done" => Ok(Self::Done),
            "error" => Ok(Self::Error),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid domain job status: {s}")),
        }
    }
}
