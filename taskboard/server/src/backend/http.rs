use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{BackendError, DashboardBackend};
use crate::config::Config;
use crate::model::{
    EmployeeTaskUpdate, Lead, LeadUpdate, Person, Post, PostDraft, PostPatch, Role, Submission,
    SubmissionPage, SubmissionQuery, SubmissionUpdate, SubtaskDraft, Task,
};

/// Fields every upstream response may carry next to its payload.
#[derive(Debug, Deserialize)]
struct Acknowledgement {
    #[serde(default = "succeeded")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn succeeded() -> bool {
    true
}

impl Default for Acknowledgement {
    fn default() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

/// [`DashboardBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| BackendError::InvalidBaseUrl(base_url.to_string()))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        Self::new(
            &config.backend_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Joins path segments onto the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    /// Sends the request and returns the raw body of a successful response.
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let acknowledgement = if body.is_empty() {
            Acknowledgement::default()
        } else {
            serde_json::from_slice(&body).unwrap_or_default()
        };

        if !status.is_success() || !acknowledgement.success {
            tracing::warn!(
                status = status.as_u16(),
                message = acknowledgement.message.as_deref(),
                "Dashboard API rejected request"
            );
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                message: acknowledgement.message,
            });
        }
        Ok(body.to_vec())
    }

    /// Sends the request and deserializes the payload stored under the first
    /// of `keys` present in the response object.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        keys: &[&str],
    ) -> Result<T, BackendError> {
        let body = self.execute(request).await?;
        let mut value: serde_json::Value = serde_json::from_slice(&body)?;
        let payload = keys
            .iter()
            .find_map(|key| value.get_mut(*key).map(serde_json::Value::take))
            .ok_or_else(|| {
                <serde_json::Error as serde::de::Error>::custom(format!(
                    "missing field `{}`",
                    keys.join("` or `")
                ))
            })?;
        Ok(serde_json::from_value(payload)?)
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    #[tracing::instrument(skip(self))]
    async fn get_employee_task(&self, id: &str) -> Result<Task, BackendError> {
        let request = self.request(Method::GET, &["api", "admin", "employee-task", id]);
        self.fetch(request, &["task"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_employee_task(
        &self,
        id: &str,
        update: &EmployeeTaskUpdate,
    ) -> Result<Task, BackendError> {
        let request = self
            .request(Method::POST, &["api", "admin", "employee-task", id])
            .json(update);
        self.fetch(request, &["task"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_manager_tasks(&self) -> Result<Vec<Task>, BackendError> {
        let request = self.request(Method::GET, &["api", "admin", "manager-tasks"]);
        self.fetch(request, &["tasks"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError> {
        let request = self.request(Method::GET, &["api", "manager", "manager-posts"]);
        self.fetch(request, &["posts"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn create_post(&self, draft: &PostDraft) -> Result<Post, BackendError> {
        let request = self
            .request(Method::POST, &["api", "manager", "manager-posts"])
            .json(draft);
        self.fetch(request, &["post"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_post(&self, id: &str, patch: &PostPatch) -> Result<Post, BackendError> {
        let request = self
            .request(Method::PATCH, &["api", "manager", "manager-posts", id])
            .json(patch);
        self.fetch(request, &["post"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post(&self, id: &str) -> Result<(), BackendError> {
        let request = self.request(Method::DELETE, &["api", "manager", "manager-posts", id]);
        self.execute(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn list_submissions(
        &self,
        query: &SubmissionQuery,
    ) -> Result<SubmissionPage, BackendError> {
        let request = self
            .request(Method::GET, &["api", "manager", "submissions"])
            .query(query);
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    #[tracing::instrument(skip(self))]
    async fn get_submission(&self, id: &str) -> Result<Submission, BackendError> {
        let request = self.request(Method::GET, &["api", "manager", "submissions", id]);
        self.fetch(request, &["submission", "formSubmission"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_submission(
        &self,
        id: &str,
        update: &SubmissionUpdate,
    ) -> Result<Submission, BackendError> {
        let request = self
            .request(Method::PUT, &["api", "manager", "submissions", id])
            .json(update);
        self.fetch(request, &["submission", "formSubmission"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_submission(&self, id: &str) -> Result<(), BackendError> {
        let request = self.request(Method::DELETE, &["api", "manager", "submissions", id]);
        self.execute(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn list_manager_subtasks(&self) -> Result<Vec<Task>, BackendError> {
        let request = self.request(Method::GET, &["api", "manager", "subtasks"]);
        self.fetch(request, &["subtasks"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_teamlead_subtasks(&self) -> Result<Vec<Task>, BackendError> {
        let request = self.request(Method::GET, &["api", "teamlead", "subtasks"]);
        self.fetch(request, &["subtasks"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_subtask(&self, id: &str) -> Result<Task, BackendError> {
        let request = self.request(Method::GET, &["api", "teamlead", "subtasks", id]);
        self.fetch(request, &["subtask"]).await
    }

    #[tracing::instrument(skip(self, draft))]
    async fn create_subtask(&self, draft: &SubtaskDraft) -> Result<Task, BackendError> {
        let request = self
            .request(Method::POST, &["api", "teamlead", "subtasks"])
            .json(draft);
        self.fetch(request, &["subtask"]).await
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update_subtask(&self, id: &str, draft: &SubtaskDraft) -> Result<Task, BackendError> {
        let request = self
            .request(Method::PUT, &["api", "teamlead", "subtasks", id])
            .json(draft);
        self.fetch(request, &["subtask"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_subtask(&self, id: &str) -> Result<(), BackendError> {
        let request = self.request(Method::DELETE, &["api", "teamlead", "subtasks", id]);
        self.execute(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn list_people(&self, role: Role) -> Result<Vec<Person>, BackendError> {
        let request = self.request(Method::GET, &["api", "teamlead", role.people_path()]);
        let keys: &[&str] = match role {
            Role::TeamLead => &["teamLeads", "teamleads"],
            Role::Manager => &["managers"],
            Role::Employee => &["employees"],
        };
        self.fetch(request, keys).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_my_leads(&self) -> Result<Vec<Lead>, BackendError> {
        let request = self.request(Method::GET, &["api", "employee", "my-lead"]);
        self.fetch(request, &["leads"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_lead(&self, id: &str) -> Result<Lead, BackendError> {
        let request = self.request(Method::GET, &["api", "employee", "my-lead", id]);
        self.fetch(request, &["lead"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> Result<Lead, BackendError> {
        let request = self
            .request(Method::PUT, &["api", "employee", "my-lead", id])
            .json(update);
        self.fetch(request, &["lead"]).await
    }
}
