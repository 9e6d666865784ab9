use serde::Serialize;
use utoipa::ToSchema;

use crate::aggregate::StatusCounts;
use crate::backend::{BackendError, DashboardBackend};
use crate::model::{
    Pagination, Post, PostDraft, PostPatch, Submission, SubmissionQuery, SubmissionUpdate,
};
use crate::view::TaskListView;

pub mod api;

/// Manager posts with a count of the ones currently visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostsView {
    #[schema(value_type = Vec<Object>)]
    pub posts: Vec<Post>,
    pub count: usize,
    pub visible_count: usize,
}

impl From<Vec<Post>> for PostsView {
    fn from(posts: Vec<Post>) -> Self {
        Self {
            count: posts.len(),
            visible_count: posts.iter().filter(|post| post.visible).count(),
            posts,
        }
    }
}

/// One page of submissions with counters over that page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsView {
    #[schema(value_type = Vec<Object>)]
    pub submissions: Vec<Submission>,
    #[schema(value_type = Object)]
    pub pagination: Pagination,
    pub stats: StatusCounts,
    /// Sequence number of the search request this page answers.
    pub seq: Option<u64>,
}

/// Manager posts, submission review and subtask overview.
pub struct ManagerService<'a> {
    backend: &'a dyn DashboardBackend,
}

impl ManagerService<'_> {
    pub fn new(backend: &dyn DashboardBackend) -> ManagerService<'_> {
        ManagerService { backend }
    }

    #[tracing::instrument(skip(self))]
    pub async fn posts(&self) -> Result<PostsView, BackendError> {
        let posts = self.backend.list_posts().await?;
        Ok(PostsView::from(posts))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, BackendError> {
        let post = self.backend.create_post(draft).await?;
        tracing::info!("Created post {}", post.id);
        Ok(post)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_post(&self, id: &str, patch: &PostPatch) -> Result<Post, BackendError> {
        self.backend.update_post(id, patch).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_post(&self, id: &str) -> Result<(), BackendError> {
        self.backend.delete_post(id).await?;
        tracing::info!("Deleted post {}", id);
        Ok(())
    }

    /// Retrieves one page of submissions and counts their statuses.
    #[tracing::instrument(skip(self))]
    pub async fn submissions(
        &self,
        query: &SubmissionQuery,
        seq: Option<u64>,
    ) -> Result<SubmissionsView, BackendError> {
        let page = self.backend.list_submissions(query).await?;
        Ok(SubmissionsView {
            stats: StatusCounts::tally(&page.form_submissions),
            submissions: page.form_submissions,
            pagination: page.pagination,
            seq,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn submission(&self, id: &str) -> Result<Submission, BackendError> {
        self.backend.get_submission(id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_submission(
        &self,
        id: &str,
        update: &SubmissionUpdate,
    ) -> Result<Submission, BackendError> {
        let submission = self.backend.update_submission(id, update).await?;
        tracing::info!("Submission {} set to {:?}", id, submission.status);
        Ok(submission)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_submission(&self, id: &str) -> Result<(), BackendError> {
        self.backend.delete_submission(id).await?;
        tracing::info!("Deleted submission {}", id);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn subtasks(&self) -> Result<TaskListView, BackendError> {
        let subtasks = self.backend.list_manager_subtasks().await?;
        Ok(TaskListView::from(subtasks))
    }
}
