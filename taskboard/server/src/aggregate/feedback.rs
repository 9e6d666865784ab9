use chrono::{DateTime, Utc};

use crate::model::{Assignment, PersonRef, Role, Task, TaskStatus};

/// One feedback message, tagged with who left it and under which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry<'a> {
    pub person: Option<&'a PersonRef>,
    pub role: Role,
    pub assignment_status: TaskStatus,
    pub feedback: &'a str,
    pub sent_at: Option<DateTime<Utc>>,
}

/// Feedback from every assignment of a task, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFeed<'a> {
    entries: Vec<FeedbackEntry<'a>>,
}

impl<'a> FeedbackFeed<'a> {
    pub fn entries(&self) -> &[FeedbackEntry<'a>] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for FeedbackFeed<'a> {
    type Item = FeedbackEntry<'a>;
    type IntoIter = std::vec::IntoIter<FeedbackEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Flattens the feedback of all team lead, manager and employee assignments
/// into one list ordered by `sent_at`, newest first.
///
/// An assignment's single `feedback`/`sentAt` pair counts as one more entry
/// unless it is blank or repeats an item of its `feedbacks` list.
///
/// The sort is stable, so equal timestamps keep team lead, manager, employee
/// order. Entries without a timestamp go last.
pub fn feedback_feed(task: &Task) -> FeedbackFeed<'_> {
    let mut entries: Vec<FeedbackEntry<'_>> = task
        .assignments()
        .flat_map(|(role, assignment)| {
            let latest = latest_feedback(assignment)
                .map(|text| entry(role, assignment, text, assignment.sent_at));
            assignment
                .feedbacks
                .iter()
                .map(move |item| entry(role, assignment, &item.feedback, item.sent_at))
                .chain(latest)
        })
        .collect();
    entries.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    FeedbackFeed { entries }
}

fn entry<'a>(
    role: Role,
    assignment: &'a Assignment,
    feedback: &'a str,
    sent_at: Option<DateTime<Utc>>,
) -> FeedbackEntry<'a> {
    FeedbackEntry {
        person: assignment.person.as_ref(),
        role,
        assignment_status: assignment.status,
        feedback,
        sent_at,
    }
}

fn latest_feedback(assignment: &Assignment) -> Option<&str> {
    let text = assignment.feedback.as_deref()?;
    let repeated = assignment
        .feedbacks
        .iter()
        .any(|item| item.feedback == text && item.sent_at == assignment.sent_at);
    (!text.trim().is_empty() && !repeated).then_some(text)
}
