use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse caller category attached to an identity.
///
/// Only `admin` and `subscriber` carry meaning for the role guards; any other
/// label is kept verbatim so it can be reported back and logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Subscriber,
    Other(String),
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const SUBSCRIBER: &'static str = "subscriber";

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => Self::ADMIN,
            Role::Subscriber => Self::SUBSCRIBER,
            Role::Other(name) => name,
        }
    }

    pub fn is_subscriber(&self) -> bool {
        matches!(self, Role::Subscriber)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::ADMIN => Role::Admin,
            Self::SUBSCRIBER => Role::Subscriber,
            _ => Role::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            _ => role.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque capability label, e.g. `prescription:create`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission {
    pub action: String,
}

impl Permission {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action)
    }
}

/// The authenticated caller, attached to the request by the authentication
/// gate and read by every guard after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,

    pub role: Role,

    #[serde(default)]
    pub permissions: HashSet<Permission>,
}

impl Identity {
    pub fn new(name: impl Into<String>, role: impl Into<Role>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            permissions: HashSet::new(),
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Permission::new).collect();
        self
    }

    /// Returns true if every permission in `required` is held by this identity.
    pub fn has_permissions(&self, required: &[Permission]) -> bool {
        required.iter().all(|p| self.permissions.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("subscriber"), Role::Subscriber);
        assert_eq!(Role::from("editor"), Role::Other(String::from("editor")));
        assert_eq!(Role::from("Admin"), Role::Other(String::from("Admin")));

        assert_eq!(String::from(Role::Subscriber), "subscriber");
        assert_eq!(Role::from("editor").to_string(), "editor");

        let role: Role = serde_json::from_str("\"subscriber\"").unwrap();
        assert!(role.is_subscriber());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_identity_json() {
        let json = r#"{"name":"alice","role":"editor","permissions":["a","b"]}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.name, "alice");
        assert_eq!(identity.role, Role::Other(String::from("editor")));
        assert!(identity.permissions.contains(&Permission::new("a")));
        assert!(identity.permissions.contains(&Permission::new("b")));

        let identity: Identity = serde_json::from_str(r#"{"name":"bob","role":"admin"}"#).unwrap();
        assert!(identity.permissions.is_empty());
    }

    #[test]
    fn test_has_permissions() {
        let identity = Identity::new("alice", "subscriber")
            .with_permissions(["prescription:read", "prescription:create"]);

        assert!(identity.has_permissions(&[]));
        assert!(identity.has_permissions(&[Permission::new("prescription:read")]));
        assert!(identity.has_permissions(&[
            Permission::new("prescription:read"),
            Permission::new("prescription:read"),
            Permission::new("prescription:create"),
        ]));
        assert!(!identity.has_permissions(&[
            Permission::new("prescription:read"),
            Permission::new("device:register"),
        ]));
    }
}
