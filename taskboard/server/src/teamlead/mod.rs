use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::aggregate::{AssigneeSelection, assign_leads};
use crate::backend::{BackendError, DashboardBackend};
use crate::model::{
    Assignment, AssignmentDraft, Person, PersonRef, Priority, Role, SubtaskDraft, Task, TaskStatus,
};
use crate::view::{TaskListView, TaskView};

pub mod api;
pub mod web;

/// Subtask form as filled in by a team lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskForm {
    #[serde(default)]
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
    #[serde(default)]
    #[schema(value_type = String)]
    pub priority: Priority,
    /// Left unchanged on edit when absent; new subtasks start pending.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub total_leads_required: u32,
    /// Left unchanged on edit when absent.
    #[serde(default)]
    pub leads_completed: Option<u32>,
    #[serde(flatten)]
    pub assignees: AssigneeSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubtaskValidationError {
    #[error("Subtask title must not be blank")]
    BlankTitle,
    #[error("{completed} leads completed exceeds the {required} required")]
    LeadsExceedTarget { completed: u32, required: u32 },
}

impl SubtaskForm {
    /// Checks the form and splits the lead target across the selected people.
    ///
    /// When editing, `existing` is the stored subtask: people who stay
    /// assigned keep their own status and progress, and fields left out of
    /// the form keep their stored values.
    pub fn into_draft(
        self,
        existing: Option<&Task>,
    ) -> Result<SubtaskDraft, SubtaskValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SubtaskValidationError::BlankTitle);
        }
        let leads_completed = self
            .leads_completed
            .or(existing.map(|task| task.leads_completed))
            .unwrap_or(0);
        if leads_completed > self.total_leads_required {
            return Err(SubtaskValidationError::LeadsExceedTarget {
                completed: leads_completed,
                required: self.total_leads_required,
            });
        }

        let mut assigned_team_lead = Vec::new();
        let mut assigned_manager = Vec::new();
        let mut assigned_employee = Vec::new();
        for draft in assign_leads(self.total_leads_required, &self.assignees) {
            let current = existing.and_then(|task| current_assignment(task, &draft.person_id));
            let draft = match current {
                Some(assignment) => draft.carry_over(assignment),
                None => draft,
            };
            let bucket: &mut Vec<AssignmentDraft> = match draft.role {
                Role::TeamLead => &mut assigned_team_lead,
                Role::Manager => &mut assigned_manager,
                Role::Employee => &mut assigned_employee,
            };
            bucket.push(draft);
        }

        Ok(SubtaskDraft {
            title: title.to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            start_date: self.start_date,
            start_time: self.start_time,
            end_date: self.end_date,
            end_time: self.end_time,
            priority: self.priority,
            status: match existing {
                Some(_) => self.status,
                None => Some(self.status.unwrap_or(TaskStatus::Pending)),
            },
            total_leads_required: self.total_leads_required,
            leads_completed,
            assigned_team_lead,
            assigned_manager,
            assigned_employee,
        })
    }
}

fn current_assignment<'a>(task: &'a Task, person_id: &str) -> Option<&'a Assignment> {
    task.assignments()
        .map(|(_, assignment)| assignment)
        .find(|assignment| assignment.person.as_ref().map(PersonRef::id) == Some(person_id))
}

/// People of one role available for assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeopleView {
    #[schema(value_type = String)]
    pub role: Role,
    #[schema(value_type = Vec<Object>)]
    pub people: Vec<Person>,
    pub count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SubtaskError {
    #[error(transparent)]
    Invalid(#[from] SubtaskValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Team lead subtask management.
pub struct TeamLeadService<'a> {
    backend: &'a dyn DashboardBackend,
}

impl TeamLeadService<'_> {
    pub fn new(backend: &dyn DashboardBackend) -> TeamLeadService<'_> {
        TeamLeadService { backend }
    }

    #[tracing::instrument(skip(self))]
    pub async fn subtasks(&self) -> Result<TaskListView, BackendError> {
        let subtasks = self.backend.list_teamlead_subtasks().await?;
        Ok(TaskListView::from(subtasks))
    }

    #[tracing::instrument(skip(self))]
    pub async fn subtask(&self, id: &str) -> Result<TaskView, BackendError> {
        let subtask = self.backend.get_subtask(id).await?;
        Ok(TaskView::from(subtask))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_subtask(&self, form: SubtaskForm) -> Result<TaskView, SubtaskError> {
        let draft = form.into_draft(None)?;
        let subtask = self.backend.create_subtask(&draft).await?;
        tracing::info!(
            "Created subtask {} for {} assignees",
            subtask.id,
            subtask.assignments().count()
        );
        Ok(TaskView::from(subtask))
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_subtask(
        &self,
        id: &str,
        form: SubtaskForm,
    ) -> Result<TaskView, SubtaskError> {
        let existing = self.backend.get_subtask(id).await?;
        let draft = form.into_draft(Some(&existing))?;
        let subtask = self.backend.update_subtask(id, &draft).await?;
        tracing::info!("Updated subtask {}", id);
        Ok(TaskView::from(subtask))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_subtask(&self, id: &str) -> Result<(), BackendError> {
        self.backend.delete_subtask(id).await?;
        tracing::info!("Deleted subtask {}", id);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn people(&self, role: Role) -> Result<PeopleView, BackendError> {
        let people = self.backend.list_people(role).await?;
        Ok(PeopleView {
            role,
            count: people.len(),
            people,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockDashboardBackend;
    use mockall::predicate::eq;

    fn form() -> SubtaskForm {
        serde_json::from_value(serde_json::json!({
            "title": " Door to door ",
            "description": "",
            "priority": "high",
            "totalLeadsRequired": 10,
            "teamLeadIds": ["u1"],
            "managerIds": ["u1", "u2"],
            "employeeIds": ["u3"]
        }))
        .unwrap()
    }

    #[test]
    fn builds_draft_with_distributed_leads() {
        let draft = form().into_draft(None).unwrap();

        assert_eq!(draft.title, "Door to door");
        assert_eq!(draft.description, None);
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.status, Some(TaskStatus::Pending));
        assert_eq!(draft.assigned_team_lead.len(), 1);
        assert_eq!(draft.assigned_manager.len(), 1);
        assert_eq!(draft.assigned_manager[0].person_id, "u2");
        assert_eq!(draft.assigned_employee.len(), 1);
        assert!(
            draft
                .assigned_team_lead
                .iter()
                .chain(&draft.assigned_manager)
                .chain(&draft.assigned_employee)
                .all(|a| a.leads_assigned == 4)
        );
    }

    #[test]
    fn rejects_blank_title() {
        let form = SubtaskForm {
            title: "   ".to_string(),
            ..form()
        };
        assert_eq!(
            form.into_draft(None),
            Err(SubtaskValidationError::BlankTitle)
        );
    }

    #[test]
    fn rejects_more_completed_than_required() {
        let form = SubtaskForm {
            leads_completed: Some(11),
            ..form()
        };
        assert_eq!(
            form.into_draft(None),
            Err(SubtaskValidationError::LeadsExceedTarget {
                completed: 11,
                required: 10
            })
        );
    }

    #[tokio::test]
    async fn invalid_form_is_not_forwarded() {
        let mut backend = MockDashboardBackend::new();
        backend.expect_create_subtask().times(0);

        let result = TeamLeadService::new(&backend)
            .create_subtask(SubtaskForm::default())
            .await;

        assert!(matches!(
            result,
            Err(SubtaskError::Invalid(SubtaskValidationError::BlankTitle))
        ));
    }

    #[tokio::test]
    async fn forwards_draft_with_assignments() {
        let mut backend = MockDashboardBackend::new();
        let expected = form().into_draft(None).unwrap();
        backend
            .expect_create_subtask()
            .with(eq(expected))
            .times(1)
            .returning(|_| {
                Ok(serde_json::from_value(serde_json::json!({
                    "_id": "st1",
                    "title": "Door to door",
                    "totalLeadsRequired": 10,
                    "assignedEmployee": [{"employeeId": "u3", "leadsAssigned": 4}]
                }))
                .unwrap())
            });

        let view = TeamLeadService::new(&backend)
            .create_subtask(form())
            .await
            .unwrap();

        assert_eq!(view.task.id, "st1");
        assert_eq!(view.assignees.len(), 1);
    }

    fn stored_subtask() -> Task {
        serde_json::from_value(serde_json::json!({
            "_id": "st1",
            "title": "Door to door",
            "status": "in_progress",
            "totalLeadsRequired": 10,
            "leadsCompleted": 3,
            "assignedEmployee": [{
                "employeeId": "u3",
                "leadsAssigned": 5,
                "status": "completed",
                "leadsCompleted": 3,
                "feedbacks": [{"feedback": "Done early", "sentAt": "2024-03-01T10:00:00Z"}]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn edit_keeps_progress_of_people_still_assigned() {
        let existing = stored_subtask();

        let draft = form().into_draft(Some(&existing)).unwrap();

        assert_eq!(draft.status, None);
        assert_eq!(draft.leads_completed, 3);
        let employee = &draft.assigned_employee[0];
        assert_eq!(employee.person_id, "u3");
        assert_eq!(employee.leads_assigned, 4);
        assert_eq!(employee.status, TaskStatus::Completed);
        assert_eq!(employee.leads_completed, 3);
        assert_eq!(employee.feedbacks.len(), 1);
        let manager = &draft.assigned_manager[0];
        assert_eq!(manager.status, TaskStatus::Pending);
        assert_eq!(manager.leads_completed, 0);
    }

    #[test]
    fn edit_rechecks_stored_progress_against_new_target() {
        let form = SubtaskForm {
            total_leads_required: 2,
            ..form()
        };

        assert_eq!(
            form.into_draft(Some(&stored_subtask())),
            Err(SubtaskValidationError::LeadsExceedTarget {
                completed: 3,
                required: 2
            })
        );
    }

    #[tokio::test]
    async fn update_reads_stored_subtask_before_writing() {
        let mut backend = MockDashboardBackend::new();
        backend
            .expect_get_subtask()
            .with(eq("st1"))
            .times(1)
            .returning(|_| Ok(stored_subtask()));
        backend
            .expect_update_subtask()
            .withf(|id, draft| {
                id == "st1"
                    && draft.status.is_none()
                    && draft.assigned_employee[0].status == TaskStatus::Completed
                    && draft.assigned_employee[0].leads_completed == 3
            })
            .times(1)
            .returning(|_, _| Ok(stored_subtask()));

        let view = TeamLeadService::new(&backend)
            .update_subtask("st1", form())
            .await
            .unwrap();

        assert_eq!(view.task.id, "st1");
    }

    #[tokio::test]
    async fn counts_people_of_role() {
        let mut backend = MockDashboardBackend::new();
        backend
            .expect_list_people()
            .with(eq(Role::Manager))
            .returning(|_| {
                Ok(serde_json::from_value(serde_json::json!([
                    {"_id": "m1", "name": "Asha"},
                    {"_id": "m2", "name": "Imran"}
                ]))
                .unwrap())
            });

        let view = TeamLeadService::new(&backend)
            .people(Role::Manager)
            .await
            .unwrap();

        assert_eq!(view.count, 2);
        assert_eq!(view.role, Role::Manager);
    }
}
