use std::collections::BTreeMap;

use crate::types::identity::Permission;
use crate::types::route::RouteInfo;

use super::requirement::{RoleRequirement, RouteRequirement};

/// Static metadata of every guarded route, keyed by route name.
///
/// Filled once while routes are registered and only read afterwards. The
/// permission list of a route is stored exactly as declared: order,
/// duplicates and emptiness are all preserved.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: BTreeMap<String, RouteRequirement>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a route. A later declaration with the same name replaces the
    /// earlier one.
    pub fn declare<I>(&mut self, name: impl Into<String>, role: Option<RoleRequirement>, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        let requirement = RouteRequirement {
            required_role: role,
            required_permissions: permissions.into_iter().collect(),
        };
        self.routes.insert(name.into(), requirement);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn requirement(&self, name: &str) -> Option<&RouteRequirement> {
        self.routes.get(name)
    }

    /// The permissions declared for `name`, or `None` for an unknown route.
    pub fn permissions(&self, name: &str) -> Option<&[Permission]> {
        self.routes
            .get(name)
            .map(|r| r.required_permissions.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteRequirement)> {
        self.routes.iter().map(|(name, r)| (name.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn list_routes(&self) -> Vec<RouteInfo> {
        self.iter()
            .map(|(name, r)| RouteInfo {
                name: name.to_string(),
                role: r.required_role.map(|role| role.to_string()),
                permissions: r.required_permissions.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare() {
        let mut registry = RouteRegistry::new();
        assert!(registry.is_empty());

        registry.declare("device.register", None, vec![]);
        assert_eq!(registry.permissions("device.register"), Some(&[][..]));
        assert!(registry.requirement("device.register").unwrap().is_empty());

        let perms = vec![
            Permission::new("prescription:create"),
            Permission::new("prescription:read"),
            Permission::new("prescription:create"),
        ];
        registry.declare(
            "prescription.create",
            Some(RoleRequirement::Subscriber),
            perms.clone(),
        );
        assert_eq!(registry.permissions("prescription.create").unwrap(), perms.as_slice());
        assert_eq!(
            registry
                .requirement("prescription.create")
                .unwrap()
                .required_role,
            Some(RoleRequirement::Subscriber)
        );

        assert!(registry.permissions("unknown").is_none());
        assert!(!registry.contains("unknown"));
        assert_eq!(registry.len(), 2);

        registry.declare("device.register", Some(RoleRequirement::Admin), vec![]);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.requirement("device.register").unwrap().required_role,
            Some(RoleRequirement::Admin)
        );
    }

    #[test]
    fn test_list_routes() {
        let mut registry = RouteRegistry::new();
        registry.declare("b", Some(RoleRequirement::Admin), vec![]);
        registry.declare("a", None, vec![Permission::new("x")]);

        let routes = registry.list_routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].name, "a");
        assert_eq!(routes[0].role, None);
        assert_eq!(routes[0].permissions, vec![Permission::new("x")]);
        assert_eq!(routes[1].name, "b");
        assert_eq!(routes[1].role.as_deref(), Some("admin"));
    }
}
