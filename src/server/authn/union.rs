use actix_web::HttpRequest;
use anyhow::Result;
use async_trait::async_trait;

use crate::types::identity::Identity;

use super::anonymous::AnonymousAuthenticator;
use super::bearer_token::BearerTokenAuthenticator;
use super::token::TokenValidator;
use super::{Authenticator, AuthnResponse};

pub enum UnionAuthenticator<T: TokenValidator> {
    BearerToken(BearerTokenAuthenticator<T>),
    Anonymous(AnonymousAuthenticator),
}

#[async_trait(?Send)]
impl<T: TokenValidator> Authenticator for UnionAuthenticator<T> {
    async fn authenticate_request(
        &self,
        req: &HttpRequest,
        user: Option<Identity>,
    ) -> Result<AuthnResponse> {
        match self {
            UnionAuthenticator::BearerToken(auth) => auth.authenticate_request(req, user).await,
            UnionAuthenticator::Anonymous(auth) => auth.authenticate_request(req, user).await,
        }
    }
}
