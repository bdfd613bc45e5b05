use std::sync::Arc;

use async_trait::async_trait;

use crate::server::authn::gate::AuthGate;
use crate::server::error::GuardError;

use super::permission::PermissionGuard;
use super::role::RoleGuard;
use super::{Guard, GuardContext};

pub enum UnionGuard<G: AuthGate> {
    /// Authentication only.
    Authn(Arc<G>),
    Role(RoleGuard<G>),
    Permission(PermissionGuard<G>),
}

#[async_trait(?Send)]
impl<G: AuthGate> Guard for UnionGuard<G> {
    async fn can_activate(&self, ctx: &GuardContext<'_>) -> Result<(), GuardError> {
        match self {
            UnionGuard::Authn(gate) => gate.can_activate(ctx.req).await,
            UnionGuard::Role(guard) => guard.can_activate(ctx).await,
            UnionGuard::Permission(guard) => guard.can_activate(ctx).await,
        }
    }
}
