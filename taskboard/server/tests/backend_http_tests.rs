use serde_json::json;
use taskboard_server::backend::{BackendError, DashboardBackend};
use taskboard_server::model::{
    AssignmentDraft, LeadStatus, Priority, Role, SubmissionQuery, SubtaskDraft, TaskStatus,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod common;

#[tokio::test]
async fn can_unwrap_payload_from_response_envelope() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/admin/employee-task/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "task": {"_id": "t1", "title": "Visit shops", "status": "in_progress"}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let task = backend.get_employee_task("t1").await.unwrap();

    assert_eq!(task.id, "t1");
    assert_eq!(task.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn can_read_team_leads_under_either_key() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/teamlead/teamleads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "teamleads": [{"_id": "tl1", "name": "Ravi"}]
        })))
        .mount(&upstream)
        .await;

    let people = backend.list_people(Role::TeamLead).await.unwrap();

    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "Ravi");
}

#[tokio::test]
async fn treats_unsuccessful_envelope_as_rejection() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/employee/my-lead"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Session expired"
        })))
        .mount(&upstream)
        .await;

    let err = backend.list_my_leads().await.unwrap_err();

    assert_eq!(err.upstream_message(), Some("Session expired"));
    assert!(matches!(err, BackendError::Rejected { status: 200, .. }));
}

#[tokio::test]
async fn keeps_status_of_failed_response() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/teamlead/subtasks/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Subtask not found"})),
        )
        .mount(&upstream)
        .await;

    let err = backend.get_subtask("missing").await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(404));
    assert_eq!(err.upstream_message(), Some("Subtask not found"));
}

#[tokio::test]
async fn reports_missing_payload_as_malformed() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/manager/manager-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&upstream)
        .await;

    let err = backend.list_posts().await.unwrap_err();

    assert!(matches!(err, BackendError::Malformed(_)));
}

#[tokio::test]
async fn forwards_submission_filters_as_query_string() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/manager/submissions"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("search", "kiran"))
        .and(query_param("status", "approved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "formSubmissions": [{"_id": "s1", "status": "approved"}],
            "pagination": {"currentPage": 2, "totalPages": 2, "totalSubmissions": 6, "limit": 5}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let page = backend
        .list_submissions(&SubmissionQuery {
            page: 2,
            limit: 5,
            search: Some("kiran".to_string()),
            status: Some(TaskStatus::Approved),
        })
        .await
        .unwrap();

    assert_eq!(page.form_submissions.len(), 1);
    assert_eq!(page.pagination.total_items, 6);
    assert!(!page.pagination.has_next_page());
}

#[tokio::test]
async fn sends_assignments_under_role_keys() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("POST"))
        .and(path("/api/teamlead/subtasks"))
        .and(body_json(json!({
            "title": "Market survey",
            "priority": "high",
            "status": "pending",
            "totalLeadsRequired": 5,
            "leadsCompleted": 0,
            "assignedTeamLead": [],
            "assignedManager": [{"managerId": "m1", "leadsAssigned": 3, "status": "pending"}],
            "assignedEmployee": [{"employeeId": "e1", "leadsAssigned": 3, "status": "pending"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "subtask": {"_id": "st1", "title": "Market survey"}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let draft = SubtaskDraft {
        title: "Market survey".to_string(),
        description: None,
        start_date: None,
        start_time: None,
        end_date: None,
        end_time: None,
        priority: Priority::High,
        status: Some(TaskStatus::Pending),
        total_leads_required: 5,
        leads_completed: 0,
        assigned_team_lead: vec![],
        assigned_manager: vec![AssignmentDraft::new(Role::Manager, "m1", 3)],
        assigned_employee: vec![AssignmentDraft::new(Role::Employee, "e1", 3)],
    };

    let subtask = backend.create_subtask(&draft).await.unwrap();

    assert_eq!(subtask.id, "st1");
}

#[tokio::test]
async fn escapes_ids_in_paths() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/api/employee/my-lead/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lead": {"_id": "a/b", "status": "not_intrested"}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let lead = backend.get_lead("a/b").await.unwrap();

    assert_eq!(lead.status, LeadStatus::NotInterested);
}

#[tokio::test]
async fn accepts_empty_body_on_delete() {
    let (upstream, backend) = common::setup_backend().await.unwrap();
    Mock::given(method("DELETE"))
        .and(path("/api/manager/submissions/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&upstream)
        .await;

    backend.delete_submission("s1").await.unwrap();
}
