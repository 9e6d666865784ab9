//! Typed view of the upstream dashboard API.
//!
//! The upstream API owns every entity; these types describe what the
//! dashboard reads from it and what it sends back. Absent or `null` nested
//! values become `None` or empty collections instead of failing the whole
//! response.

use serde::{Deserialize, Deserializer};

pub mod lead;
pub mod person;
pub mod post;
pub mod status;
pub mod submission;
pub mod task;

pub use lead::{Lead, LeadStatus, LeadUpdate};
pub use person::{Person, PersonRef, Role};
pub use post::{Attachment, Post, PostDraft, PostPatch};
pub use status::{Priority, TaskStatus};
pub use submission::{Pagination, Submission, SubmissionPage, SubmissionQuery, SubmissionUpdate};
pub use task::{Assignment, AssignmentDraft, EmployeeTaskUpdate, Feedback, SubtaskDraft, Task};

/// Deserializes `null` the same way as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
