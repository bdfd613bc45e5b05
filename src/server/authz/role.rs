use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::server::authn::gate::{self, AuthGate};
use crate::server::error::GuardError;

use super::requirement::RoleRequirement;
use super::{Guard, GuardContext};

/// Guard that authenticates the request, then checks the caller's role.
///
/// The authentication gate is injected and always awaited first; its
/// rejection is returned unchanged and the role is never looked at.
pub struct RoleGuard<G: AuthGate> {
    gate: Arc<G>,
    requirement: RoleRequirement,
}

impl<G: AuthGate> RoleGuard<G> {
    pub fn new(gate: Arc<G>, requirement: RoleRequirement) -> Self {
        Self { gate, requirement }
    }

    /// Rejects subscribers with "Admin access only".
    pub fn admin(gate: Arc<G>) -> Self {
        Self::new(gate, RoleRequirement::Admin)
    }

    /// Rejects everyone but subscribers with "Subscriber access only".
    pub fn subscriber(gate: Arc<G>) -> Self {
        Self::new(gate, RoleRequirement::Subscriber)
    }

    pub fn requirement(&self) -> RoleRequirement {
        self.requirement
    }
}

#[async_trait(?Send)]
impl<G: AuthGate> Guard for RoleGuard<G> {
    async fn can_activate(&self, ctx: &GuardContext<'_>) -> Result<(), GuardError> {
        self.gate.can_activate(ctx.req).await?;

        let identity = gate::identity(ctx.req)?;
        if let Err(e) = self.requirement.check(&identity.role) {
            debug!(
                "Deny '{}' (role '{}') on route '{}': {e}",
                identity.name, identity.role, ctx.route
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
    use crate::types::identity::Identity;

    use super::*;

    async fn check(requirement: RoleRequirement, role: &str) -> Result<(), GuardError> {
        let gate = Arc::new(FixedGate::allow(Identity::new("someone", role)));
        let guard = RoleGuard::new(gate, requirement);
        let req = TestRequest::default().to_http_request();
        guard.can_activate(&GuardContext::new(&req, "test")).await
    }

    #[actix_web::test]
    async fn test_role_scenarios() {
        let admin = RoleRequirement::Admin;
        let subscriber = RoleRequirement::Subscriber;

        // admin identity
        assert!(check(admin, "admin").await.is_ok());
        let err = check(subscriber, "admin").await.unwrap_err();
        assert_eq!(err.reason(), "Subscriber access only");

        // subscriber identity
        let err = check(admin, "subscriber").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.reason(), "Admin access only");
        assert!(check(subscriber, "subscriber").await.is_ok());

        // any other role is only "not a subscriber"
        assert!(check(admin, "editor").await.is_ok());
        assert!(check(subscriber, "editor").await.is_err());
        assert!(check(admin, "guest").await.is_ok());
    }

    #[actix_web::test]
    async fn test_role_guard_with_tokens() {
        let gate = Arc::new(test_gate());
        let admin = RoleGuard::admin(gate.clone());
        let subscriber = RoleGuard::subscriber(gate);

        let req = token_request("admin-token");
        let ctx = GuardContext::new(&req, "routes.list");
        assert!(admin.can_activate(&ctx).await.is_ok());
        assert!(subscriber.can_activate(&ctx).await.is_err());

        let req = token_request("alice-token");
        let ctx = GuardContext::new(&req, "prescription.create");
        assert_eq!(
            admin.can_activate(&ctx).await.unwrap_err().reason(),
            "Admin access only"
        );
        assert!(subscriber.can_activate(&ctx).await.is_ok());
        // Idempotent
        assert!(subscriber.can_activate(&ctx).await.is_ok());
    }

    #[actix_web::test]
    async fn test_authn_failure_short_circuits() {
        let gate = Arc::new(FixedGate::reject());
        let admin = RoleGuard::admin(gate.clone());
        let subscriber = RoleGuard::subscriber(gate.clone());

        let req = TestRequest::default().to_http_request();
        let ctx = GuardContext::new(&req, "test");
        for guard in [&admin, &subscriber] {
            let err = guard.can_activate(&ctx).await.unwrap_err();
            assert!(err.is_unauthenticated());
            assert_eq!(err.reason(), "Invalid token");
        }
        assert_eq!(gate.calls(), 2);
        // No identity was ever attached, so the role was never evaluated
        assert!(gate::identity(&req).is_err());
    }
}
