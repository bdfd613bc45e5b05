use actix_web::HttpRequest;
use anyhow::Result;
use async_trait::async_trait;

use crate::types::identity::{Identity, Role};

use super::{Authenticator, AuthnResponse};

/// Authenticator that provides anonymous access when no other authentication is available.
///
/// If a user is already authenticated, it preserves their identity.
/// Otherwise, it yields an anonymous identity with the configured role and no permissions.
pub struct AnonymousAuthenticator {
    role: Role,
}

impl AnonymousAuthenticator {
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

#[async_trait(?Send)]
impl Authenticator for AnonymousAuthenticator {
    async fn authenticate_request(
        &self,
        _req: &HttpRequest,
        user: Option<Identity>,
    ) -> Result<AuthnResponse> {
        if let Some(user) = user {
            return Ok(AuthnResponse::Ok(user));
        }

        Ok(AuthnResponse::Ok(Identity::new(
            String::new(),
            self.role.clone(),
        )))
    }
}
