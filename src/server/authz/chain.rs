use async_trait::async_trait;

use crate::server::authn::gate::AuthGate;
use crate::server::error::GuardError;

use super::union::UnionGuard;
use super::{Guard, GuardContext};

/// The guards attached to one route, run in order.
///
/// The request passes only when every guard passes; the first rejection is
/// returned as is and the remaining guards never run.
pub struct ChainGuard<G: AuthGate> {
    pub(super) guards: Vec<UnionGuard<G>>,
}

impl<G: AuthGate> ChainGuard<G> {
    pub fn new(guards: Vec<UnionGuard<G>>) -> Self {
        Self { guards }
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

#[async_trait(?Send)]
impl<G: AuthGate> Guard for ChainGuard<G> {
    async fn can_activate(&self, ctx: &GuardContext<'_>) -> Result<(), GuardError> {
        for guard in self.guards.iter() {
            guard.can_activate(ctx).await?;
        }
        Ok(())
    }
}
