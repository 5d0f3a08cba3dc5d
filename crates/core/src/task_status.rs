//! Task status values.
//!
//! The backend matches on the literal strings below, so casing and
//! spacing must be preserved exactly on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_WAITING_FOR_APPROVAL: &str = "Waiting for Approval";
pub const STATUS_COMPLETED: &str = "Completed";
pub const STATUS_BLOCKED: &str = "Blocked";

/// All valid status strings, in display order.
pub const VALID_TASK_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_WAITING_FOR_APPROVAL,
    STATUS_COMPLETED,
    STATUS_BLOCKED,
];

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// Status of a single task.
///
/// There is no transition guard: any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Waiting for Approval")]
    WaitingForApproval,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Blocked")]
    Blocked,
}

impl TaskStatus {
    /// Every status, in the same order as [`VALID_TASK_STATUSES`].
    pub const ALL: [TaskStatus; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::WaitingForApproval,
        Self::Completed,
        Self::Blocked,
    ];

    /// Convert from the wire string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_WAITING_FOR_APPROVAL => Ok(Self::WaitingForApproval),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_BLOCKED => Ok(Self::Blocked),
            _ => Err(CoreError::Validation(format!(
                "Invalid task status '{s}'. Must be one of: {}",
                VALID_TASK_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the wire string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::WaitingForApproval => STATUS_WAITING_FOR_APPROVAL,
            Self::Completed => STATUS_COMPLETED,
            Self::Blocked => STATUS_BLOCKED,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_value(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
