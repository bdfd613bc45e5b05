use std::collections::HashMap;
use std::sync::Arc;

use actix_web::HttpRequest;

use crate::server::authn::gate::{self, AuthGate};
use crate::server::error::GuardError;
use crate::types::identity::Identity;
use crate::types::route::CaniResponse;

use super::chain::ChainGuard;
use super::registry::RouteRegistry;
use super::role::RoleGuard;
use super::{Guard, GuardContext};

/// Guard chains of every registered route, plus the guards the server's own
/// endpoints use.
pub struct RouteGuards<G: AuthGate> {
    gate: Arc<G>,
    registry: Arc<RouteRegistry>,
    chains: HashMap<String, ChainGuard<G>>,
    admin: RoleGuard<G>,
}

impl<G: AuthGate> RouteGuards<G> {
    pub fn new(
        gate: Arc<G>,
        registry: Arc<RouteRegistry>,
        chains: HashMap<String, ChainGuard<G>>,
    ) -> Self {
        let admin = RoleGuard::admin(gate.clone());
        Self {
            gate,
            registry,
            chains,
            admin,
        }
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    pub fn chain(&self, route: &str) -> Option<&ChainGuard<G>> {
        self.chains.get(route)
    }

    /// Runs the chain of `route`. Returns `None` if no such route exists.
    pub async fn check(&self, req: &HttpRequest, route: &str) -> Option<Result<(), GuardError>> {
        let chain = self.chains.get(route)?;
        Some(chain.can_activate(&GuardContext::new(req, route)).await)
    }

    /// Authenticates the request and returns the caller.
    pub async fn authenticate(&self, req: &HttpRequest) -> Result<Identity, GuardError> {
        self.gate.can_activate(req).await?;
        gate::identity(req)
    }

    /// Authenticates the request and reports whether the caller would pass
    /// `route`, without rejecting it. Returns `Ok(None)` for an unknown route.
    pub async fn cani(
        &self,
        req: &HttpRequest,
        route: &str,
    ) -> Result<Option<CaniResponse>, GuardError> {
        let identity = self.authenticate(req).await?;
        let requirement = match self.registry.requirement(route) {
            Some(requirement) => requirement,
            None => return Ok(None),
        };

        let resp = match requirement.check(&identity) {
            Ok(()) => CaniResponse {
                allow: true,
                reason: None,
            },
            Err(GuardError::Internal(e)) => return Err(GuardError::Internal(e)),
            Err(e) => CaniResponse {
                allow: false,
                reason: Some(e.reason()),
            },
        };
        Ok(Some(resp))
    }

    /// Admin guard for the server's own management endpoints.
    pub async fn check_admin(&self, req: &HttpRequest, route: &str) -> Result<(), GuardError> {
        self.admin.can_activate(&GuardContext::new(req, route)).await
    }
}
