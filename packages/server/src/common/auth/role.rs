use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who a token was issued to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Parent,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Parent => "parent",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Role::Parent),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(anyhow::anyhow!("unknown role: {}", other)),
        }
    }
}

/// Operations gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Own profile, documents, child and visits
    ActAsParent,

    /// List parents with their linked children
    ViewParents,

    /// Add, list and delete child records
    ManageChildren,

    /// Assign children to parents and move adoption status
    ManageAdoptions,

    /// Schedule visits and review reschedule requests
    ManageVisits,

    /// Create and list staff accounts
    ManageStaff,

    /// Create admins, view the admin dashboard
    FullAdmin,
}

impl Capability {
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Capability::ActAsParent => &[Role::Parent],
            Capability::ViewParents
            | Capability::ManageAdoptions
            | Capability::ManageVisits => &[Role::Staff, Role::Admin],
            Capability::ManageChildren | Capability::ManageStaff | Capability::FullAdmin => {
                &[Role::Admin]
            }
        }
    }
}
