use actix_web::HttpRequest;
use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::types::identity::Identity;

use super::token::TokenValidator;
use super::{Authenticator, AuthnResponse};

pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub struct BearerTokenAuthenticator<T: TokenValidator> {
    validator: T,
}

impl<T: TokenValidator> BearerTokenAuthenticator<T> {
    pub fn new(validator: T) -> Self {
        Self { validator }
    }
}

#[async_trait(?Send)]
impl<T: TokenValidator> Authenticator for BearerTokenAuthenticator<T> {
    async fn authenticate_request(
        &self,
        req: &HttpRequest,
        _user: Option<Identity>,
    ) -> Result<AuthnResponse> {
        let auth = match req.headers().get(HEADER_AUTHORIZATION) {
            Some(auth) => match auth.to_str() {
                Ok(auth) => auth.trim().to_string(),
                Err(_) => return Ok(AuthnResponse::Unauthenticated),
            },
            None => return Ok(AuthnResponse::Continue),
        };

        if auth.is_empty() {
            return Ok(AuthnResponse::Continue);
        }

        let mut iter = auth.split_whitespace();
        match iter.next() {
            Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {}
            _ => return Ok(AuthnResponse::Unauthenticated),
        }

        let token = match iter.next() {
            Some(token) => token,
            None => return Ok(AuthnResponse::Unauthenticated),
        };
        if iter.next().is_some() {
            return Ok(AuthnResponse::Unauthenticated);
        }

        match self.validator.validate_token(token) {
            Ok(identity) => Ok(AuthnResponse::Ok(identity)),
            Err(e) => {
                debug!("Reject bearer token: {e:#}");
                Ok(AuthnResponse::Unauthenticated)
            }
        }
    }
}
