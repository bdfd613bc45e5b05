use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{CommonConfig, PathSet};
use crate::types::identity::Permission;

use super::requirement::RoleRequirement;

/// Authorization related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthzConfig {
    /// Guarded routes. Every route requires authentication; `role` and
    /// `permissions` add checks on top of it. Defaults to empty.
    #[serde(default = "AuthzConfig::default_routes")]
    pub routes: Vec<RouteConfig>,
}

/// Authorization requirements of one route.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RouteConfig {
    pub name: String,

    /// Either "admin" or "subscriber". Omit for no role check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRequirement>,

    /// Permissions the caller must all hold. Duplicates are allowed, an empty
    /// list means no permission check.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl CommonConfig for AuthzConfig {
    fn default() -> Self {
        Self {
            routes: Self::default_routes(),
        }
    }

    fn complete(&mut self, _ps: &PathSet) -> Result<()> {
        let mut names = HashSet::new();
        for (idx, route) in self.routes.iter().enumerate() {
            route.validate().with_context(|| format!("routes[{idx}]"))?;
            if !names.insert(route.name.as_str()) {
                bail!("duplicate route name '{}'", route.name);
            }
        }
        Ok(())
    }
}

impl AuthzConfig {
    pub fn default_routes() -> Vec<RouteConfig> {
        vec![]
    }
}

impl RouteConfig {
    const MAX_NAME_LENGTH: usize = 100;

    /// Route names are matched against the raw request path, so they must
    /// not need percent-encoding.
    fn is_name_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '-')
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("name cannot be empty");
        }
        if self.name.len() > Self::MAX_NAME_LENGTH {
            bail!("name length must be less than {}", Self::MAX_NAME_LENGTH);
        }
        if let Some(c) = self.name.chars().find(|c| !Self::is_name_char(*c)) {
            bail!("invalid character {c:?} in name '{}', expect [A-Za-z0-9._:-]", self.name);
        }
        if self.permissions.iter().any(|p| p.action.is_empty()) {
            bail!("permission cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<AuthzConfig> {
        let mut cfg: AuthzConfig = toml::from_str(s)?;
        cfg.complete(&PathSet::new_test())?;
        Ok(cfg)
    }

    #[test]
    fn test_complete() {
        let cfg = parse("").unwrap();
        assert!(cfg.routes.is_empty());

        let cfg = parse(
            r#"
            [[routes]]
            name = "prescription.create"
            role = "subscriber"
            permissions = ["prescription:create", "prescription:create"]

            [[routes]]
            name = "device.register"

            [[routes]]
            name = "billing:invoice_list-v2"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.routes.len(), 3);
        assert_eq!(cfg.routes[0].role, Some(RoleRequirement::Subscriber));
        assert_eq!(cfg.routes[0].permissions.len(), 2);
        assert_eq!(cfg.routes[1].role, None);
        assert!(cfg.routes[1].permissions.is_empty());

        for bad in [
            "[[routes]]\nname = \"\"",
            "[[routes]]\nname = \"a/b\"",
            "[[routes]]\nname = \"device register\"",
            "[[routes]]\nname = \"a%20b\"",
            "[[routes]]\nname = \"a?b\"",
            "[[routes]]\nname = \"a#b\"",
            "[[routes]]\nname = \"caf\u{00e9}\"",
            "[[routes]]\nname = \"a\"\nrole = \"editor\"",
            "[[routes]]\nname = \"a\"\npermissions = [\"\"]",
            "[[routes]]\nname = \"a\"\n[[routes]]\nname = \"a\"",
        ] {
            assert!(parse(bad).is_err(), "config {bad:?} should be rejected");
        }
    }
}
