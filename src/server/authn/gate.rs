use actix_web::{HttpMessage, HttpRequest};
use async_trait::async_trait;
use log::error;

use crate::server::error::GuardError;
use crate::types::identity::Identity;

use super::{Authenticator, AuthnResponse};

/// The authentication step every guard runs first.
///
/// On success the request extensions hold the caller [`Identity`]; read it
/// back with [`identity`].
#[async_trait(?Send)]
pub trait AuthGate: Send + Sync {
    async fn can_activate(&self, req: &HttpRequest) -> Result<(), GuardError>;
}

/// Gate backed by an [`Authenticator`], usually a chain.
pub struct AuthnGate<A: Authenticator> {
    authn: A,
}

impl<A: Authenticator> AuthnGate<A> {
    pub fn new(authn: A) -> Self {
        Self { authn }
    }
}

#[async_trait(?Send)]
impl<A: Authenticator> AuthGate for AuthnGate<A> {
    async fn can_activate(&self, req: &HttpRequest) -> Result<(), GuardError> {
        let resp = match self.authn.authenticate_request(req, None).await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Authentication failed: {e:#}");
                return Err(GuardError::Internal(e));
            }
        };
        match resp {
            AuthnResponse::Ok(identity) => {
                req.extensions_mut().insert(identity);
                Ok(())
            }
            AuthnResponse::Continue => Err(GuardError::unauthenticated("Missing credential")),
            AuthnResponse::Unauthenticated => Err(GuardError::unauthenticated("Invalid token")),
        }
    }
}

/// Reads the identity attached by a successful [`AuthGate::can_activate`].
pub fn identity(req: &HttpRequest) -> Result<Identity, GuardError> {
    match req.extensions().get::<Identity>() {
        Some(identity) => Ok(identity.clone()),
        None => Err(GuardError::unauthenticated("Missing identity")),
    }
}
