use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::model::{AssignmentDraft, Role};

/// Leads each assignee must cover: `ceil(total / assignee_count)`, or zero
/// when nobody is selected.
///
/// The ceiling means the allocations can add up to more than `total`
/// (10 leads over 3 people gives 4 each, 12 in all). That surplus is kept.
pub fn per_assignee(total: u32, assignee_count: usize) -> u32 {
    if assignee_count == 0 {
        return 0;
    }
    let count = u32::try_from(assignee_count).unwrap_or(u32::MAX);
    total.div_ceil(count)
}

/// Summary of how a lead target splits across a number of assignees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadDistribution {
    pub total: u32,
    pub assignees: usize,
    pub per_assignee: u32,
    /// Sum of all allocations.
    pub allocated: u64,
    /// How far `allocated` exceeds `total`.
    pub over_allocated: u64,
}

impl LeadDistribution {
    pub fn new(total: u32, assignees: usize) -> Self {
        let per_assignee = per_assignee(total, assignees);
        let allocated = u64::from(per_assignee) * assignees as u64;
        Self {
            total,
            assignees,
            per_assignee,
            allocated,
            over_allocated: allocated.saturating_sub(u64::from(total)),
        }
    }
}

/// People picked in the subtask form, grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeSelection {
    #[serde(default)]
    pub team_lead_ids: Vec<String>,
    #[serde(default)]
    pub manager_ids: Vec<String>,
    #[serde(default)]
    pub employee_ids: Vec<String>,
}

impl AssigneeSelection {
    fn ids_for(&self, role: Role) -> &[String] {
        match role {
            Role::TeamLead => &self.team_lead_ids,
            Role::Manager => &self.manager_ids,
            Role::Employee => &self.employee_ids,
        }
    }

    /// Selected people deduplicated by id. The first role a person was picked
    /// under wins; blank ids are dropped.
    pub fn unique(&self) -> Vec<(Role, &str)> {
        let mut seen = HashSet::new();
        Role::ALL
            .into_iter()
            .flat_map(|role| self.ids_for(role).iter().map(move |id| (role, id.trim())))
            .filter(|(_, id)| !id.is_empty() && seen.insert(*id))
            .collect()
    }
}

/// Stamps every unique selected person with their share of `total`.
pub fn assign_leads(total: u32, selection: &AssigneeSelection) -> Vec<AssignmentDraft> {
    let people = selection.unique();
    let leads_assigned = per_assignee(total, people.len());
    people
        .into_iter()
        .map(|(role, id)| AssignmentDraft::new(role, id, leads_assigned))
        .collect()
}
