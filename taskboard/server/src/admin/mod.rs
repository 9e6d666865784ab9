use crate::backend::{BackendError, DashboardBackend};
use crate::model::EmployeeTaskUpdate;
use crate::view::{TaskListView, TaskView};

pub mod api;
pub mod web;

/// Admin review of employee and manager tasks.
pub struct AdminService<'a> {
    backend: &'a dyn DashboardBackend,
}

impl AdminService<'_> {
    pub fn new(backend: &dyn DashboardBackend) -> AdminService<'_> {
        AdminService { backend }
    }

    /// Retrieves an employee task with its feedback feed and progress.
    #[tracing::instrument(skip(self))]
    pub async fn employee_task(&self, id: &str) -> Result<TaskView, BackendError> {
        let task = self.backend.get_employee_task(id).await?;
        Ok(TaskView::from(task))
    }

    /// Posts a status or feedback update, then re-reads the task so the view
    /// reflects whatever the upstream API stored.
    #[tracing::instrument(skip(self))]
    pub async fn review_employee_task(
        &self,
        id: &str,
        update: &EmployeeTaskUpdate,
    ) -> Result<TaskView, BackendError> {
        self.backend.update_employee_task(id, update).await?;
        tracing::info!("Employee task {} reviewed", id);
        self.employee_task(id).await
    }

    /// Retrieves all manager tasks with status counters.
    #[tracing::instrument(skip(self))]
    pub async fn manager_tasks(&self) -> Result<TaskListView, BackendError> {
        let tasks = self.backend.list_manager_tasks().await?;
        Ok(TaskListView::from(tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockDashboardBackend;
    use crate::model::{Task, TaskStatus};
    use mockall::predicate::eq;

    fn task(id: &str, status: &str) -> Task {
        serde_json::from_value(serde_json::json!({"_id": id, "title": "Visit", "status": status}))
            .unwrap()
    }

    #[tokio::test]
    async fn review_refetches_after_update() {
        let mut backend = MockDashboardBackend::new();
        let update = EmployeeTaskUpdate {
            status: Some(TaskStatus::Approved),
            feedback: Some("Good work".to_string()),
        };
        backend
            .expect_update_employee_task()
            .with(eq("t1"), eq(update.clone()))
            .times(1)
            .returning(|_, _| Ok(task("t1", "pending")));
        backend
            .expect_get_employee_task()
            .with(eq("t1"))
            .times(1)
            .returning(|_| Ok(task("t1", "approved")));

        let view = AdminService::new(&backend)
            .review_employee_task("t1", &update)
            .await
            .unwrap();

        assert_eq!(view.task.status, TaskStatus::Approved);
        assert_eq!(view.rollup_status, TaskStatus::Approved);
    }

    #[tokio::test]
    async fn manager_tasks_include_stats() {
        let mut backend = MockDashboardBackend::new();
        backend
            .expect_list_manager_tasks()
            .returning(|| Ok(vec![task("m1", "completed"), task("m2", "pending")]));

        let view = AdminService::new(&backend).manager_tasks().await.unwrap();

        assert_eq!(view.tasks.len(), 2);
        assert_eq!(view.stats.completion_rate, 50);
    }

    #[tokio::test]
    async fn propagates_backend_errors() {
        let mut backend = MockDashboardBackend::new();
        backend.expect_get_employee_task().returning(|_| {
            Err(BackendError::Rejected {
                status: 404,
                message: Some("Task not found".to_string()),
            })
        });

        let result = AdminService::new(&backend).employee_task("missing").await;

        assert!(matches!(
            result,
            Err(BackendError::Rejected { status: 404, .. })
        ));
    }
}
