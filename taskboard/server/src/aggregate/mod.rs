//! Derived figures computed from data fetched from the upstream API.
//!
//! Everything in here is a pure function of its input and never writes back
//! to the data it reads.

pub mod distribution;
pub mod feedback;
pub mod rollup;
pub mod stats;

pub use distribution::{AssigneeSelection, LeadDistribution, assign_leads, per_assignee};
pub use feedback::{FeedbackEntry, FeedbackFeed, feedback_feed};
pub use rollup::{lead_progress, rollup_status};
pub use stats::{HasStatus, LeadCounts, StatusCounts};
