//! JSON view models returned by the dashboard API: upstream entities joined
//! with the figures derived from them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::aggregate::{FeedbackEntry, StatusCounts, feedback_feed, lead_progress, rollup_status};
use crate::model::{Assignment, PersonRef, Priority, Role, Task, TaskStatus};

/// One message of a task's feedback feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub person_id: Option<String>,
    pub person_name: Option<String>,
    pub profile_pic: Option<String>,
    #[schema(value_type = String)]
    pub role: Role,
    pub role_label: String,
    #[schema(value_type = String)]
    pub assignment_status: TaskStatus,
    pub feedback: String,
    pub sent_at: Option<DateTime<Utc>>,
}

impl From<FeedbackEntry<'_>> for FeedbackItem {
    fn from(entry: FeedbackEntry<'_>) -> Self {
        Self {
            person_id: entry.person.map(|p| p.id().to_string()),
            person_name: entry.person.map(|p| p.display_name().to_string()),
            profile_pic: entry
                .person
                .and_then(PersonRef::profile_pic)
                .map(str::to_string),
            role: entry.role,
            role_label: entry.role.label().to_string(),
            assignment_status: entry.assignment_status,
            feedback: entry.feedback.to_string(),
            sent_at: entry.sent_at,
        }
    }
}

/// Progress of one person on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeProgress {
    pub person_id: Option<String>,
    pub person_name: Option<String>,
    #[schema(value_type = String)]
    pub role: Role,
    #[schema(value_type = String)]
    pub status: TaskStatus,
    pub status_label: String,
    pub leads_assigned: u32,
    pub leads_completed: u32,
    pub progress: u32,
}

impl AssigneeProgress {
    fn new(role: Role, assignment: &Assignment) -> Self {
        Self {
            person_id: assignment.person.as_ref().map(|p| p.id().to_string()),
            person_name: assignment
                .person
                .as_ref()
                .map(|p| p.display_name().to_string()),
            role,
            status: assignment.status,
            status_label: assignment.status.label().to_string(),
            leads_assigned: assignment.leads_assigned,
            leads_completed: assignment.leads_completed,
            progress: lead_progress(assignment.leads_completed, assignment.leads_assigned),
        }
    }
}

/// A task with its combined status, progress and feedback feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[schema(value_type = Object)]
    pub task: Task,
    #[schema(value_type = String)]
    pub rollup_status: TaskStatus,
    pub rollup_label: String,
    pub progress: u32,
    pub assignees: Vec<AssigneeProgress>,
    pub feedback: Vec<FeedbackItem>,
    pub feedback_count: usize,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        let feedback: Vec<FeedbackItem> = feedback_feed(&task)
            .into_iter()
            .map(FeedbackItem::from)
            .collect();
        let assignees = task
            .assignments()
            .map(|(role, assignment)| AssigneeProgress::new(role, assignment))
            .collect();
        let rollup_status = rollup_status(&task);
        Self {
            rollup_status,
            rollup_label: rollup_status.label().to_string(),
            progress: lead_progress(task.leads_completed, task.total_leads_required),
            assignees,
            feedback_count: feedback.len(),
            feedback,
            task,
        }
    }
}

/// Row of a task listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    #[schema(value_type = String)]
    pub status: TaskStatus,
    #[schema(value_type = String)]
    pub rollup_status: TaskStatus,
    #[schema(value_type = String)]
    pub priority: Priority,
    pub priority_label: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_leads_required: u32,
    pub leads_completed: u32,
    pub progress: u32,
    pub assignee_count: usize,
    pub feedback_count: usize,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            rollup_status: rollup_status(task),
            priority: task.priority,
            priority_label: task.priority.label().to_string(),
            start_date: task.start_date.clone(),
            end_date: task.end_date.clone(),
            total_leads_required: task.total_leads_required,
            leads_completed: task.leads_completed,
            progress: lead_progress(task.leads_completed, task.total_leads_required),
            assignee_count: task.assignments().count(),
            feedback_count: feedback_feed(task).total(),
        }
    }
}

/// A task listing with its status counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskListView {
    pub tasks: Vec<TaskSummary>,
    pub stats: StatusCounts,
}

impl From<Vec<Task>> for TaskListView {
    fn from(tasks: Vec<Task>) -> Self {
        Self {
            stats: StatusCounts::tally(&tasks),
            tasks: tasks.iter().map(TaskSummary::from).collect(),
        }
    }
}
