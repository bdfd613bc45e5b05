mod permission;
mod role;
mod union;

pub mod chain;
pub mod config;
pub mod factory;
pub mod registry;
pub mod requirement;
pub mod routes;

use actix_web::HttpRequest;
use async_trait::async_trait;

use super::error::GuardError;

pub use permission::PermissionGuard;
pub use role::RoleGuard;

/// A pre-dispatch check that allows or denies a request.
///
/// `Ok(())` lets the request proceed; any error is terminal for it. Guards
/// hold no per-request state and may run any number of times per request.
#[async_trait(?Send)]
pub trait Guard: Send + Sync {
    async fn can_activate(&self, ctx: &GuardContext<'_>) -> Result<(), GuardError>;
}

/// What a guard sees of the request it checks.
pub struct GuardContext<'a> {
    pub req: &'a HttpRequest,
    /// Name of the registered route being dispatched to.
    pub route: &'a str,
}

impl<'a> GuardContext<'a> {
    pub fn new(req: &'a HttpRequest, route: &'a str) -> Self {
        Self { req, route }
    }
}
