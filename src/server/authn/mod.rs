mod anonymous;
mod bearer_token;
mod union;

pub mod chain;
pub mod config;
pub mod factory;
pub mod gate;
pub mod token;

use actix_web::HttpRequest;
use anyhow::Result;
use async_trait::async_trait;

use crate::types::identity::Identity;

/// Trait for request authenticators.
///
/// Implementors of this trait can authenticate HTTP requests and optionally
/// chain with other authenticators to provide multiple authentication methods.
///
/// The returned future is not `Send`: it borrows the actix request, which
/// lives on a single worker thread.
#[async_trait(?Send)]
pub trait Authenticator: Send + Sync {
    /// Attempts to authenticate a request.
    ///
    /// # Arguments
    ///
    /// * `req` - The HTTP request to authenticate
    /// * `user` - Optional identity from previous authentication attempts
    ///
    /// # Returns
    ///
    /// * `Ok(AuthnResponse::Ok(identity))` - Authentication successful
    /// * `Ok(AuthnResponse::Continue)` - Authentication skipped, try next authenticator
    /// * `Ok(AuthnResponse::Unauthenticated)` - Authentication failed
    /// * `Err(_)` - Internal error during authentication
    async fn authenticate_request(
        &self,
        req: &HttpRequest,
        user: Option<Identity>,
    ) -> Result<AuthnResponse>;
}

/// Response from an authentication attempt.
#[derive(Debug)]
pub enum AuthnResponse {
    /// Authentication successful, contains the caller identity
    Ok(Identity),
    /// Authentication skipped, should try next authenticator
    Continue,
    /// Authentication failed, should stop authentication chain
    Unauthenticated,
}
