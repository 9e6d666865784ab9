use serde::{Deserialize, Serialize};

/// A person as returned by the people listings and populated references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// Reference to a person: either populated by the upstream API or a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonRef {
    Populated(Person),
    Id(String),
}

impl PersonRef {
    pub fn id(&self) -> &str {
        match self {
            PersonRef::Populated(person) => &person.id,
            PersonRef::Id(id) => id,
        }
    }

    /// Name to show for this person, falling back to the id when the
    /// reference was not populated or the name is blank.
    pub fn display_name(&self) -> &str {
        match self {
            PersonRef::Populated(person) if !person.name.trim().is_empty() => &person.name,
            _ => self.id(),
        }
    }

    pub fn profile_pic(&self) -> Option<&str> {
        match self {
            PersonRef::Populated(person) => person.profile_pic.as_deref(),
            PersonRef::Id(_) => None,
        }
    }
}

/// Roles that can be attached to a task through an assignment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    TeamLead,
    Manager,
    Employee,
}

impl Role {
    /// All assignable roles, in the order their feedback is flattened.
    pub const ALL: [Role; 3] = [Role::TeamLead, Role::Manager, Role::Employee];

    pub fn label(self) -> &'static str {
        match self {
            Role::TeamLead => "Team Lead",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    /// Key under which an assignment record references its person.
    pub fn person_key(self) -> &'static str {
        match self {
            Role::TeamLead => "teamLeadId",
            Role::Manager => "managerId",
            Role::Employee => "employeeId",
        }
    }

    /// Path segment of the upstream people listing for this role.
    pub fn people_path(self) -> &'static str {
        match self {
            Role::TeamLead => "teamleads",
            Role::Manager => "managers",
            Role::Employee => "employees",
        }
    }
}
