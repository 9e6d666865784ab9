use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::null_as_default;

/// Sales lead status. Wire values keep the upstream spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "signed")]
    Signed,
    #[serde(rename = "not_avaiable", alias = "not_available")]
    NotAvailable,
    #[serde(rename = "not_intrested", alias = "not_interested")]
    NotInterested,
    #[serde(rename = "re_shedule", alias = "reschedule")]
    Reschedule,
    #[serde(other, rename = "other")]
    Other,
}

impl LeadStatus {
    pub fn label(self) -> &'static str {
        match self {
            LeadStatus::Pending => "Pending",
            LeadStatus::Signed => "Signed",
            LeadStatus::NotAvailable => "Not Available",
            LeadStatus::NotInterested => "Not Interested",
            LeadStatus::Reschedule => "Reschedule",
            LeadStatus::Other => "Unknown",
        }
    }
}

/// A sales/contact record tracked by an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: LeadStatus,
    #[serde(default, rename = "VendorStatus", alias = "vendorStatus")]
    pub vendor_status: Option<String>,
    #[serde(default, rename = "MachineStatus", alias = "machineStatus")]
    pub machine_status: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Contact fields the dashboard does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeadUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub status: Option<LeadStatus>,
    #[serde(
        default,
        rename = "VendorStatus",
        alias = "vendorStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor_status: Option<String>,
    #[serde(
        default,
        rename = "MachineStatus",
        alias = "machineStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub machine_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
