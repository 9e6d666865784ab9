use super::stats::percentage;
use crate::model::{Task, TaskStatus};

/// Collapses the per-assignee statuses of a task into one status.
///
/// A task without assignments keeps its own status. Otherwise any rejection
/// wins, then unanimous approval, then "everyone done", then "nobody
/// started"; anything else is in progress.
pub fn rollup_status(task: &Task) -> TaskStatus {
    let statuses: Vec<TaskStatus> = task.assignments().map(|(_, a)| a.status).collect();
    if statuses.is_empty() {
        return task.status;
    }
    if statuses.contains(&TaskStatus::Rejected) {
        return TaskStatus::Rejected;
    }
    if statuses.iter().all(|s| *s == TaskStatus::Approved) {
        return TaskStatus::Approved;
    }
    if statuses.iter().all(|s| s.is_done()) {
        return TaskStatus::Completed;
    }
    if statuses
        .iter()
        .all(|s| matches!(s, TaskStatus::Pending | TaskStatus::Other))
    {
        return TaskStatus::Pending;
    }
    TaskStatus::InProgress
}

/// Completion percentage of a lead target, capped at 100.
pub fn lead_progress(completed: u32, required: u32) -> u32 {
    percentage(completed, required).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with(own: &str, statuses: &[&str]) -> Task {
        let employees: Vec<serde_json::Value> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| serde_json::json!({"employeeId": format!("e{i}"), "status": s}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "_id": "t1",
            "status": own,
            "assignedEmployee": employees
        }))
        .unwrap()
    }

    #[test]
    fn keeps_own_status_without_assignments() {
        assert_eq!(rollup_status(&task_with("completed", &[])), TaskStatus::Completed);
    }

    #[test]
    fn any_rejection_rejects() {
        let task = task_with("pending", &["approved", "rejected", "completed"]);
        assert_eq!(rollup_status(&task), TaskStatus::Rejected);
    }

    #[test]
    fn unanimous_approval_approves() {
        assert_eq!(
            rollup_status(&task_with("pending", &["approved", "approved"])),
            TaskStatus::Approved
        );
    }

    #[test]
    fn done_mix_is_completed() {
        assert_eq!(
            rollup_status(&task_with("pending", &["approved", "completed"])),
            TaskStatus::Completed
        );
    }

    #[test]
    fn partial_progress_is_in_progress() {
        assert_eq!(
            rollup_status(&task_with("pending", &["pending", "completed"])),
            TaskStatus::InProgress
        );
        assert_eq!(
            rollup_status(&task_with("pending", &["pending", "pending"])),
            TaskStatus::Pending
        );
    }

    #[test]
    fn progress_is_capped() {
        assert_eq!(lead_progress(3, 10), 30);
        assert_eq!(lead_progress(12, 10), 100);
        assert_eq!(lead_progress(5, 0), 0);
    }
}
