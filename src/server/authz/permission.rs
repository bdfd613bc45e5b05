use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::server::authn::gate::{self, AuthGate};
use crate::server::error::GuardError;

use super::registry::RouteRegistry;
use super::requirement::check_permissions;
use super::{Guard, GuardContext};

/// Guard that enforces the permissions declared for the dispatched route.
///
/// The route's list is read from the registry at dispatch time. An unknown
/// route or an empty list requires nothing beyond authentication.
pub struct PermissionGuard<G: AuthGate> {
    gate: Arc<G>,
    registry: Arc<RouteRegistry>,
}

impl<G: AuthGate> PermissionGuard<G> {
    pub fn new(gate: Arc<G>, registry: Arc<RouteRegistry>) -> Self {
        Self { gate, registry }
    }
}

#[async_trait(?Send)]
impl<G: AuthGate> Guard for PermissionGuard<G> {
    async fn can_activate(&self, ctx: &GuardContext<'_>) -> Result<(), GuardError> {
        self.gate.can_activate(ctx.req).await?;

        let required = match self.registry.permissions(ctx.route) {
            Some(required) if !required.is_empty() => required,
            _ => return Ok(()),
        };

        let identity = gate::identity(ctx.req)?;
        if let Err(e) = check_permissions(&identity, required) {
            debug!(
                "Deny '{}' on route '{}': {e}, required: {:?}",
                identity.name, ctx.route, required
            );
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use crate::server::authn::gate::tests::{test_gate, token_request, FixedGate};
    use crate::server::authz::requirement::RoleRequirement;
    use crate::types::identity::Permission;

    use super::*;

    fn test_registry() -> Arc<RouteRegistry> {
        let mut registry = RouteRegistry::new();
        registry.declare(
            "prescription.create",
            Some(RoleRequirement::Subscriber),
            vec![Permission::new("prescription:create")],
        );
        registry.declare(
            "prescription.delete",
            None,
            vec![
                Permission::new("prescription:read"),
                Permission::new("prescription:delete"),
            ],
        );
        registry.declare("device.register", None, vec![]);
        Arc::new(registry)
    }

    #[actix_web::test]
    async fn test_permission_guard() {
        let guard = PermissionGuard::new(Arc::new(test_gate()), test_registry());

        let req = token_request("alice-token");
        for route in ["prescription.create", "device.register", "not.registered"] {
            assert!(
                guard.can_activate(&GuardContext::new(&req, route)).await.is_ok(),
                "alice should pass {route}"
            );
        }
        let err = guard
            .can_activate(&GuardContext::new(&req, "prescription.delete"))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.reason(), "Insufficient permissions");

        // The permission guard does not look at roles
        let req = token_request("admin-token");
        assert!(guard
            .can_activate(&GuardContext::new(&req, "device.register"))
            .await
            .is_ok());
        assert!(guard
            .can_activate(&GuardContext::new(&req, "prescription.create"))
            .await
            .is_err());
    }

    #[actix_web::test]
    async fn test_permission_guard_unauthenticated() {
        let gate = Arc::new(FixedGate::reject());
        let guard = PermissionGuard::new(gate.clone(), test_registry());

        let req = TestRequest::default().to_http_request();
        for route in ["prescription.create", "device.register"] {
            let err = guard
                .can_activate(&GuardContext::new(&req, route))
                .await
                .unwrap_err();
            assert!(err.is_unauthenticated());
        }
        assert_eq!(gate.calls(), 2);
    }
}
