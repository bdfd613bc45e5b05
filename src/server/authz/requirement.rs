use std::fmt;

use serde::{Deserialize, Serialize};

use crate::server::error::{GuardError, ADMIN_ONLY, INSUFFICIENT_PERMISSIONS, SUBSCRIBER_ONLY};
use crate::types::identity::{Identity, Permission, Role};

/// Role check attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleRequirement {
    /// Rejects subscribers. Every other role passes, including roles the
    /// service does not know about.
    Admin,
    /// Accepts subscribers only.
    Subscriber,
}

impl RoleRequirement {
    pub fn check(&self, role: &Role) -> Result<(), GuardError> {
        match self {
            Self::Admin if role.is_subscriber() => Err(GuardError::Unauthorized(ADMIN_ONLY)),
            Self::Admin => Ok(()),
            Self::Subscriber if role.is_subscriber() => Ok(()),
            Self::Subscriber => Err(GuardError::Unauthorized(SUBSCRIBER_ONLY)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => Role::ADMIN,
            Self::Subscriber => Role::SUBSCRIBER,
        }
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that every permission in `required` is held by `identity`.
pub fn check_permissions(identity: &Identity, required: &[Permission]) -> Result<(), GuardError> {
    if identity.has_permissions(required) {
        return Ok(());
    }
    Err(GuardError::Unauthorized(INSUFFICIENT_PERMISSIONS))
}

/// Everything a route asks of its callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    pub required_role: Option<RoleRequirement>,
    pub required_permissions: Vec<Permission>,
}

impl RouteRequirement {
    /// The full decision for one identity: role first, then permissions.
    pub fn check(&self, identity: &Identity) -> Result<(), GuardError> {
        if let Some(role) = self.required_role {
            role.check(&identity.role)?;
        }
        check_permissions(identity, &self.required_permissions)
    }

    pub fn is_empty(&self) -> bool {
        self.required_role.is_none() && self.required_permissions.is_empty()
    }
}
