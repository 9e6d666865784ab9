use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use super::{PersonRef, Priority, Role, TaskStatus, null_as_default};

/// A single feedback message left on an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: String,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

/// Links a task to one responsible person with that person's own progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(
        default,
        alias = "teamLeadId",
        alias = "managerId",
        alias = "employeeId"
    )]
    pub person: Option<PersonRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leads_assigned: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leads_completed: u32,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedbacks: Vec<Feedback>,
}

/// Task, manager task or subtask; the upstream API uses one shape for all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_leads_required: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leads_completed: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_team_lead: Vec<Assignment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_manager: Vec<Assignment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_employee: Vec<Assignment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn assignments_for(&self, role: Role) -> &[Assignment] {
        match role {
            Role::TeamLead => &self.assigned_team_lead,
            Role::Manager => &self.assigned_manager,
            Role::Employee => &self.assigned_employee,
        }
    }

    /// Every assignment record tagged with its role, team leads first.
    pub fn assignments(&self) -> impl Iterator<Item = (Role, &Assignment)> {
        Role::ALL.into_iter().flat_map(move |role| {
            self.assignments_for(role)
                .iter()
                .map(move |assignment| (role, assignment))
        })
    }
}

/// Status and feedback update posted by an admin on an employee task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Outgoing assignment: one selected person, the leads they must cover and
/// their own progress on the subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    pub role: Role,
    pub person_id: String,
    pub leads_assigned: u32,
    pub status: TaskStatus,
    pub leads_completed: u32,
    pub feedback: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub feedbacks: Vec<Feedback>,
}

impl AssignmentDraft {
    /// A fresh, pending assignment.
    pub fn new(role: Role, person_id: impl Into<String>, leads_assigned: u32) -> Self {
        Self {
            role,
            person_id: person_id.into(),
            leads_assigned,
            status: TaskStatus::Pending,
            leads_completed: 0,
            feedback: None,
            sent_at: None,
            feedbacks: Vec::new(),
        }
    }

    /// Keeps the status, progress and feedback the person already has on
    /// `existing`; only the lead share comes from this draft.
    pub fn carry_over(self, existing: &Assignment) -> Self {
        Self {
            status: existing.status,
            leads_completed: existing.leads_completed,
            feedback: existing.feedback.clone(),
            sent_at: existing.sent_at,
            feedbacks: existing.feedbacks.clone(),
            ..self
        }
    }
}

impl Serialize for AssignmentDraft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(self.role.person_key(), &self.person_id)?;
        map.serialize_entry("leadsAssigned", &self.leads_assigned)?;
        map.serialize_entry("status", &self.status)?;
        if self.leads_completed > 0 {
            map.serialize_entry("leadsCompleted", &self.leads_completed)?;
        }
        if let Some(feedback) = &self.feedback {
            map.serialize_entry("feedback", feedback)?;
        }
        if let Some(sent_at) = &self.sent_at {
            map.serialize_entry("sentAt", sent_at)?;
        }
        if !self.feedbacks.is_empty() {
            map.serialize_entry("feedbacks", &self.feedbacks)?;
        }
        map.end()
    }
}

/// Body sent upstream when a team lead creates or edits a subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub priority: Priority,
    /// Absent on edits that leave the subtask status alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    pub total_leads_required: u32,
    pub leads_completed: u32,
    pub assigned_team_lead: Vec<AssignmentDraft>,
    pub assigned_manager: Vec<AssignmentDraft>,
    pub assigned_employee: Vec<AssignmentDraft>,
}
