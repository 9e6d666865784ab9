use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{Assignment, Lead, LeadStatus, Submission, Task, TaskStatus};

/// Anything carrying a lifecycle status.
pub trait HasStatus {
    fn status(&self) -> TaskStatus;
}

impl HasStatus for TaskStatus {
    fn status(&self) -> TaskStatus {
        *self
    }
}

impl HasStatus for Task {
    fn status(&self) -> TaskStatus {
        self.status
    }
}

impl HasStatus for Assignment {
    fn status(&self) -> TaskStatus {
        self.status
    }
}

impl HasStatus for Submission {
    fn status(&self) -> TaskStatus {
        self.status
    }
}

/// `round(part / total * 100)`, rounding halves up, or zero for an empty set.
pub(crate) fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = (u64::from(part) * 200 + u64::from(total)) / (u64::from(total) * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Counts by status over a list. Completed and approved share one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub rejected: u32,
    /// Statuses outside the known set.
    pub other: u32,
    /// Percentage of items that are completed or approved.
    pub completion_rate: u32,
}

impl StatusCounts {
    pub fn tally<T: HasStatus>(items: &[T]) -> Self {
        let mut counts = items.iter().fold(Self::default(), |mut counts, item| {
            counts.total += 1;
            match item.status() {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed | TaskStatus::Approved => counts.completed += 1,
                TaskStatus::Rejected => counts.rejected += 1,
                TaskStatus::Other => counts.other += 1,
            }
            counts
        });
        counts.completion_rate = percentage(counts.completed, counts.total);
        counts
    }
}

/// Counts of an employee's leads by lead status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadCounts {
    pub total: u32,
    pub pending: u32,
    pub signed: u32,
    pub not_available: u32,
    pub not_interested: u32,
    pub reschedule: u32,
    pub other: u32,
    /// Percentage of leads that were signed.
    pub signed_rate: u32,
}

impl LeadCounts {
    pub fn tally(leads: &[Lead]) -> Self {
        let mut counts = leads.iter().fold(Self::default(), |mut counts, lead| {
            counts.total += 1;
            match lead.status {
                LeadStatus::Pending => counts.pending += 1,
                LeadStatus::Signed => counts.signed += 1,
                LeadStatus::NotAvailable => counts.not_available += 1,
                LeadStatus::NotInterested => counts.not_interested += 1,
                LeadStatus::Reschedule => counts.reschedule += 1,
                LeadStatus::Other => counts.other += 1,
            }
            counts
        });
        counts.signed_rate = percentage(counts.signed, counts.total);
        counts
    }
}
