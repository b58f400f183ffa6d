//! Driving ports for repair request reads.

use async_trait::async_trait;

use crate::domain::{Error, RepairRequestOverview, TrackingView};

/// Public lookup by tracking token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingQuery: Send + Sync {
    /// Resolve a raw token taken from a tracking link.
    ///
    /// Blank tokens fail before any storage access.
    async fn track(&self, raw_token: &str) -> Result<TrackingView, Error>;
}

/// Admin listing of every repair request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepairRequestReviewQuery: Send + Sync {
    /// All requests newest first, with summary counters.
    async fn overview(&self) -> Result<RepairRequestOverview, Error>;
}
