use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};

use crate::server::authn::gate::AuthGate;

use super::chain::ChainGuard;
use super::config::AuthzConfig;
use super::permission::PermissionGuard;
use super::registry::RouteRegistry;
use super::requirement::RouteRequirement;
use super::role::RoleGuard;
use super::routes::RouteGuards;
use super::union::UnionGuard;

/// Builds the route registry and the guard chain of each route.
///
/// A route's chain holds, in order:
/// 1. A role guard, if the route names a role
/// 2. A permission guard, if the route declares permissions
/// 3. The bare authentication gate, if neither of the above applies
pub struct AuthzFactory;

impl AuthzFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn build_registry(&self, cfg: &AuthzConfig) -> RouteRegistry {
        let mut registry = RouteRegistry::new();
        for route in cfg.routes.iter() {
            registry.declare(
                route.name.clone(),
                route.role,
                route.permissions.iter().cloned(),
            );
        }
        registry
    }

    pub fn build_route_guards<G: AuthGate>(&self, cfg: &AuthzConfig, gate: Arc<G>) -> RouteGuards<G> {
        let registry = Arc::new(self.build_registry(cfg));
        if registry.is_empty() {
            warn!("No route configured, every check request will be answered with 404");
        }

        let mut chains = HashMap::with_capacity(registry.len());
        for (name, requirement) in registry.iter() {
            let chain = self.build_chain(requirement, gate.clone(), registry.clone());
            info!(
                "Register route '{name}', role: {}, permissions: {}, guards: {}",
                requirement
                    .required_role
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| String::from("-")),
                requirement.required_permissions.len(),
                chain.len()
            );
            chains.insert(name.to_string(), chain);
        }

        RouteGuards::new(gate, registry, chains)
    }

    fn build_chain<G: AuthGate>(
        &self,
        requirement: &RouteRequirement,
        gate: Arc<G>,
        registry: Arc<RouteRegistry>,
    ) -> ChainGuard<G> {
        let mut guards = Vec::new();

        if let Some(role) = requirement.required_role {
            guards.push(UnionGuard::Role(RoleGuard::new(gate.clone(), role)));
        }

        if !requirement.required_permissions.is_empty() {
            guards.push(UnionGuard::Permission(PermissionGuard::new(
                gate.clone(),
                registry,
            )));
        }

        if guards.is_empty() {
            guards.push(UnionGuard::Authn(gate));
        }

        ChainGuard::new(guards)
    }
}
