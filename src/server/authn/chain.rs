use actix_web::HttpRequest;
use anyhow::Result;
use async_trait::async_trait;

use crate::types::identity::Identity;

use super::token::TokenValidator;
use super::union::UnionAuthenticator;
use super::{Authenticator, AuthnResponse};

/// Chain of authenticators that processes authentication requests sequentially.
///
/// Each authenticator in the chain can:
/// - Pass through (Continue) to the next authenticator
/// - Authenticate the user (Ok) and pass to next authenticator for additional processing
/// - Reject the authentication (Unauthenticated) and stop the chain
///
/// The last successful authentication result is returned.
pub struct ChainAuthenticator<T: TokenValidator> {
    pub(super) authenticators: Vec<UnionAuthenticator<T>>,
}

impl<T: TokenValidator> ChainAuthenticator<T> {
    pub fn new(authenticators: Vec<UnionAuthenticator<T>>) -> Self {
        Self { authenticators }
    }
}

#[async_trait(?Send)]
impl<T: TokenValidator> Authenticator for ChainAuthenticator<T> {
    async fn authenticate_request(
        &self,
        req: &HttpRequest,
        mut user: Option<Identity>,
    ) -> Result<AuthnResponse> {
        for authenticator in self.authenticators.iter() {
            let old_user = user.take();
            let resp = authenticator.authenticate_request(req, old_user).await?;
            match resp {
                AuthnResponse::Ok(new_user) => user = Some(new_user),
                AuthnResponse::Continue => continue,
                AuthnResponse::Unauthenticated => return Ok(AuthnResponse::Unauthenticated),
            }
        }
        match user {
            Some(user) => Ok(AuthnResponse::Ok(user)),
            None => Ok(AuthnResponse::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use crate::server::authn::anonymous::AnonymousAuthenticator;
    use crate::server::authn::bearer_token::BearerTokenAuthenticator;
    use crate::server::authn::token::tests::test_validator;
    use crate::types::identity::Role;

    use super::*;

    #[actix_web::test]
    async fn test_chain() {
        let chain = ChainAuthenticator::new(vec![
            UnionAuthenticator::BearerToken(BearerTokenAuthenticator::new(test_validator())),
            UnionAuthenticator::Anonymous(AnonymousAuthenticator::new(Role::from("guest"))),
        ]);

        // Anonymous fallback
        let req = TestRequest::default().to_http_request();
        match chain.authenticate_request(&req, None).await.unwrap() {
            AuthnResponse::Ok(identity) => {
                assert!(identity.name.is_empty());
                assert_eq!(identity.role, Role::Other(String::from("guest")));
                assert!(identity.permissions.is_empty());
            }
            resp => panic!("expected anonymous identity, got {resp:?}"),
        }

        // Token identity survives the anonymous authenticator
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer alice-token"))
            .to_http_request();
        match chain.authenticate_request(&req, None).await.unwrap() {
            AuthnResponse::Ok(identity) => {
                assert_eq!(identity.name, "alice");
                assert_eq!(identity.role, Role::Subscriber);
            }
            resp => panic!("expected token identity, got {resp:?}"),
        }

        // Bad token stops the chain before the anonymous fallback
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer stolen-token"))
            .to_http_request();
        let resp = chain.authenticate_request(&req, None).await.unwrap();
        assert!(matches!(resp, AuthnResponse::Unauthenticated));
    }

    #[actix_web::test]
    async fn test_chain_without_anonymous() {
        let chain = ChainAuthenticator::new(vec![UnionAuthenticator::BearerToken(
            BearerTokenAuthenticator::new(test_validator()),
        )]);

        let req = TestRequest::default().to_http_request();
        let resp = chain.authenticate_request(&req, None).await.unwrap();
        assert!(matches!(resp, AuthnResponse::Continue));
    }
}
