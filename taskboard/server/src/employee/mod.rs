use serde::Serialize;
use utoipa::ToSchema;

use crate::aggregate::LeadCounts;
use crate::backend::{BackendError, DashboardBackend};
use crate::model::{Lead, LeadStatus, LeadUpdate};

pub mod api;

/// An employee's leads with counters over all of them.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadsView {
    #[schema(value_type = Vec<Object>)]
    pub leads: Vec<Lead>,
    pub counts: LeadCounts,
}

/// Employee lead tracking.
pub struct EmployeeService<'a> {
    backend: &'a dyn DashboardBackend,
}

impl EmployeeService<'_> {
    pub fn new(backend: &dyn DashboardBackend) -> EmployeeService<'_> {
        EmployeeService { backend }
    }

    /// Retrieves the employee's leads. Counters always cover every lead;
    /// `status` only narrows the returned list.
    #[tracing::instrument(skip(self))]
    pub async fn leads(&self, status: Option<LeadStatus>) -> Result<LeadsView, BackendError> {
        let mut leads = self.backend.list_my_leads().await?;
        let counts = LeadCounts::tally(&leads);
        if let Some(status) = status {
            leads.retain(|lead| lead.status == status);
        }
        Ok(LeadsView { leads, counts })
    }

    #[tracing::instrument(skip(self))]
    pub async fn lead(&self, id: &str) -> Result<Lead, BackendError> {
        self.backend.get_lead(id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_lead(&self, id: &str, update: &LeadUpdate) -> Result<Lead, BackendError> {
        let lead = self.backend.update_lead(id, update).await?;
        tracing::info!("Lead {} is now {}", id, lead.status.label());
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockDashboardBackend;
    use mockall::predicate::eq;

    fn leads() -> Vec<Lead> {
        serde_json::from_value(serde_json::json!([
            {"_id": "l1", "status": "signed"},
            {"_id": "l2", "status": "not_avaiable"},
            {"_id": "l3", "status": "signed"},
            {"_id": "l4", "status": "callback_later"},
            {"_id": "l5"}
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn counts_every_lead_status() {
        let mut backend = MockDashboardBackend::new();
        backend.expect_list_my_leads().returning(|| Ok(leads()));

        let view = EmployeeService::new(&backend).leads(None).await.unwrap();

        assert_eq!(view.leads.len(), 5);
        assert_eq!(
            view.counts,
            LeadCounts {
                total: 5,
                pending: 1,
                signed: 2,
                not_available: 1,
                not_interested: 0,
                reschedule: 0,
                other: 1,
                signed_rate: 40,
            }
        );
    }

    #[tokio::test]
    async fn status_filter_keeps_full_counters() {
        let mut backend = MockDashboardBackend::new();
        backend.expect_list_my_leads().returning(|| Ok(leads()));

        let view = EmployeeService::new(&backend)
            .leads(Some(LeadStatus::Signed))
            .await
            .unwrap();

        let ids: Vec<&str> = view.leads.iter().map(|lead| lead.id.as_str()).collect();
        assert_eq!(ids, vec!["l1", "l3"]);
        assert_eq!(view.counts.total, 5);
    }

    #[tokio::test]
    async fn forwards_lead_update() {
        let mut backend = MockDashboardBackend::new();
        let update = LeadUpdate {
            status: Some(LeadStatus::Reschedule),
            notes: Some("Call after 6pm".to_string()),
            ..LeadUpdate::default()
        };
        backend
            .expect_update_lead()
            .with(eq("l2"), eq(update.clone()))
            .times(1)
            .returning(|_, _| {
                Ok(serde_json::from_value(serde_json::json!({"_id": "l2", "status": "re_shedule"}))
                    .unwrap())
            });

        let lead = EmployeeService::new(&backend)
            .update_lead("l2", &update)
            .await
            .unwrap();

        assert_eq!(lead.status, LeadStatus::Reschedule);
    }
}
