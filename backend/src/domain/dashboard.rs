//! Admin dashboard read model.

use serde::Serialize;

use super::{RepairRequest, RepairStatus};

/// Counters shown above the admin list.
///
/// `cancelled` requests count towards `total` only, so
/// `pending + in_progress + completed <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusSummary {
    /// Tally a set of requests.
    ///
    /// # Examples
    /// ```
    /// use techfix::domain::StatusSummary;
    ///
    /// let summary = StatusSummary::tally(&[]);
    /// assert_eq!(summary.total, 0);
    /// ```
    #[must_use]
    pub fn tally(requests: &[RepairRequest]) -> Self {
        requests
            .iter()
            .fold(Self::default(), |mut summary, request| {
                summary.total += 1;
                match request.status() {
                    RepairStatus::Pending => summary.pending += 1,
                    RepairStatus::InProgress => summary.in_progress += 1,
                    RepairStatus::Completed => summary.completed += 1,
                    RepairStatus::Cancelled => {}
                }
                summary
            })
    }
}

/// A repair request as the admin sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewedRepairRequest {
    pub request: RepairRequest,
    pub tracking_url: String,
    pub contact_link: String,
}

/// Admin list plus its counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRequestOverview {
    pub requests: Vec<ReviewedRepairRequest>,
    pub summary: StatusSummary,
}

/// Sort newest first, breaking timestamp ties by id (descending).
pub fn sort_newest_first(requests: &mut [RepairRequest]) {
    requests.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::{RepairRequestSubmission, TrackingToken, ValidatedSubmission};

    fn request_with(status: RepairStatus, offset_minutes: i64) -> RepairRequest {
        let submission = ValidatedSubmission::try_from(RepairRequestSubmission {
            name: "Jane".to_owned(),
            device_type: Some("tablet".to_owned()),
            service_category: None,
            problem: "Cracked screen".to_owned(),
            contact_method: "email".to_owned(),
            contact: "jane@example.nl".to_owned(),
        })
        .expect("valid submission");
        let created = Utc::now() + TimeDelta::minutes(offset_minutes);
        let mut request = RepairRequest::submitted(submission, TrackingToken::generate(), created);
        request
            .change_status(status, created)
            .expect("pending may move anywhere");
        request
    }

    #[rstest]
    fn cancelled_requests_only_count_towards_total() {
        let requests = vec![
            request_with(RepairStatus::Pending, 0),
            request_with(RepairStatus::InProgress, 1),
            request_with(RepairStatus::Completed, 2),
            request_with(RepairStatus::Cancelled, 3),
        ];
        let summary = StatusSummary::tally(&requests);
        assert_eq!(
            summary,
            StatusSummary {
                total: 4,
                pending: 1,
                in_progress: 1,
                completed: 1,
            }
        );
        assert!(summary.pending + summary.in_progress + summary.completed <= summary.total);
    }

    #[rstest]
    fn sorts_newest_first() {
        let mut requests = vec![
            request_with(RepairStatus::Pending, 0),
            request_with(RepairStatus::Pending, 10),
            request_with(RepairStatus::Pending, 5),
        ];
        sort_newest_first(&mut requests);
        let created: Vec<_> = requests.iter().map(RepairRequest::created_at).collect();
        assert!(created.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
