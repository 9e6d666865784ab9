//! Access to the upstream dashboard REST API.
//!
//! [`DashboardBackend`] has one method per upstream endpoint. Handlers only
//! ever talk to the trait, so they can be exercised against a mock.

use async_trait::async_trait;

use crate::model::{
    EmployeeTaskUpdate, Lead, LeadUpdate, Person, Post, PostDraft, PostPatch, Role, Submission,
    SubmissionPage, SubmissionQuery, SubmissionUpdate, SubtaskDraft, Task,
};

mod http;

pub use http::HttpBackend;

/// Error type for upstream API calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (connect error, timeout, ...).
    #[error("Request to the dashboard API failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status or `success: false`.
    #[error("Dashboard API rejected the request with status {status}")]
    Rejected { status: u16, message: Option<String> },
    /// The API answered, but not with the expected shape.
    #[error("Malformed response from the dashboard API: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid dashboard API URL '{0}'")]
    InvalidBaseUrl(String),
}

impl BackendError {
    /// Message supplied by the upstream API, if it sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Upstream status code for rejected requests.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            BackendError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations offered by the upstream dashboard API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// `GET /api/admin/employee-task/{id}`
    async fn get_employee_task(&self, id: &str) -> Result<Task, BackendError>;
    /// `POST /api/admin/employee-task/{id}`
    async fn update_employee_task(
        &self,
        id: &str,
        update: &EmployeeTaskUpdate,
    ) -> Result<Task, BackendError>;
    /// `GET /api/admin/manager-tasks`
    async fn list_manager_tasks(&self) -> Result<Vec<Task>, BackendError>;

    /// `GET /api/manager/manager-posts`
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError>;
    /// `POST /api/manager/manager-posts`
    async fn create_post(&self, draft: &PostDraft) -> Result<Post, BackendError>;
    /// `PATCH /api/manager/manager-posts/{id}`
    async fn update_post(&self, id: &str, patch: &PostPatch) -> Result<Post, BackendError>;
    /// `DELETE /api/manager/manager-posts/{id}`
    async fn delete_post(&self, id: &str) -> Result<(), BackendError>;

    /// `GET /api/manager/submissions`
    async fn list_submissions(
        &self,
        query: &SubmissionQuery,
    ) -> Result<SubmissionPage, BackendError>;
    /// `GET /api/manager/submissions/{id}`
    async fn get_submission(&self, id: &str) -> Result<Submission, BackendError>;
    /// `PUT /api/manager/submissions/{id}`
    async fn update_submission(
        &self,
        id: &str,
        update: &SubmissionUpdate,
    ) -> Result<Submission, BackendError>;
    /// `DELETE /api/manager/submissions/{id}`
    async fn delete_submission(&self, id: &str) -> Result<(), BackendError>;
    /// `GET /api/manager/subtasks`
    async fn list_manager_subtasks(&self) -> Result<Vec<Task>, BackendError>;

    /// `GET /api/teamlead/subtasks`
    async fn list_teamlead_subtasks(&self) -> Result<Vec<Task>, BackendError>;
    /// `GET /api/teamlead/subtasks/{id}`
    async fn get_subtask(&self, id: &str) -> Result<Task, BackendError>;
    /// `POST /api/teamlead/subtasks`
    async fn create_subtask(&self, draft: &SubtaskDraft) -> Result<Task, BackendError>;
    /// `PUT /api/teamlead/subtasks/{id}`
    async fn update_subtask(&self, id: &str, draft: &SubtaskDraft) -> Result<Task, BackendError>;
    /// `DELETE /api/teamlead/subtasks/{id}`
    async fn delete_subtask(&self, id: &str) -> Result<(), BackendError>;
    /// `GET /api/teamlead/employees`, `/managers` or `/teamleads`
    async fn list_people(&self, role: Role) -> Result<Vec<Person>, BackendError>;

    /// `GET /api/employee/my-lead`
    async fn list_my_leads(&self) -> Result<Vec<Lead>, BackendError>;
    /// `GET /api/employee/my-lead/{id}`
    async fn get_lead(&self, id: &str) -> Result<Lead, BackendError>;
    /// `PUT /api/employee/my-lead/{id}`
    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> Result<Lead, BackendError>;
}
