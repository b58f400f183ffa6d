//! Repair lifecycle status and its transition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a repair request.
///
/// Serialised in kebab-case (`in-progress`) to match stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RepairStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Stable wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable from `self`, including `self`.
    ///
    /// `cancelled` is terminal. A completed repair may be reopened to
    /// `in-progress` but never sent back to `pending`.
    #[must_use]
    pub const fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[
                Self::Pending,
                Self::InProgress,
                Self::Completed,
                Self::Cancelled,
            ],
            Self::InProgress => &[
                Self::InProgress,
                Self::Pending,
                Self::Completed,
                Self::Cancelled,
            ],
            Self::Completed => &[Self::Completed, Self::InProgress],
            Self::Cancelled => &[Self::Cancelled],
        }
    }

    /// Whether moving from `self` to `target` is permitted.
    ///
    /// # Examples
    /// ```
    /// use techfix::domain::RepairStatus;
    ///
    /// assert!(RepairStatus::Pending.can_transition_to(RepairStatus::Completed));
    /// assert!(!RepairStatus::Cancelled.can_transition_to(RepairStatus::Pending));
    /// ```
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_targets().contains(&target)
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown repair status: {value}")]
pub struct ParseRepairStatusError {
    pub value: String,
}

impl FromStr for RepairStatus {
    type Err = ParseRepairStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseRepairStatusError {
                value: s.to_owned(),
            })
    }
}

/// A status change the transition table forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move a repair request from {from} to {to}")]
pub struct StatusTransitionError {
    pub from: RepairStatus,
    pub to: RepairStatus,
}

/// Outcome of applying a status change to a repair request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The request already had the requested status; nothing was touched.
    Unchanged,
    /// The status moved and `updated_at` advanced.
    Changed { from: RepairStatus },
}
