use log::{info, warn};

use crate::types::identity::Role;

use super::anonymous::AnonymousAuthenticator;
use super::bearer_token::BearerTokenAuthenticator;
use super::chain::ChainAuthenticator;
use super::config::AuthnConfig;
use super::gate::AuthnGate;
use super::token::StaticTokenValidator;
use super::union::UnionAuthenticator;

/// Factory for building the authentication gate based on configuration.
///
/// The gate wraps a chain of authenticators in the following order:
/// 1. Bearer token authentication (always enabled)
/// 2. Anonymous authentication (if enabled in config)
pub struct AuthnFactory;

impl AuthnFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn build_gate(&self, cfg: &AuthnConfig) -> AuthnGate<ChainAuthenticator<StaticTokenValidator>> {
        AuthnGate::new(self.build_authenticator(cfg))
    }

    pub fn build_authenticator(&self, cfg: &AuthnConfig) -> ChainAuthenticator<StaticTokenValidator> {
        let mut authenticators = Vec::new();

        let validator = StaticTokenValidator::new(&cfg.tokens);
        if validator.is_empty() {
            warn!("No bearer token configured, every non-anonymous request will be rejected");
        } else {
            info!("Loaded {} bearer token(s)", validator.len());
        }
        authenticators.push(UnionAuthenticator::BearerToken(
            BearerTokenAuthenticator::new(validator),
        ));

        if cfg.allow_anonymous {
            let role = Role::from(cfg.anonymous_role.as_str());
            if !role.is_subscriber() {
                warn!("Anonymous role '{role}' is not subscriber, anonymous requests will pass admin-only routes");
            }
            info!("Anonymous authentication is enabled, role: '{role}'");
            authenticators.push(UnionAuthenticator::Anonymous(AnonymousAuthenticator::new(
                role,
            )));
        }

        ChainAuthenticator::new(authenticators)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CommonConfig;

    use super::*;

    fn is_anonymous_enabled(chain: &ChainAuthenticator<StaticTokenValidator>) -> bool {
        chain
            .authenticators
            .iter()
            .any(|auth| matches!(auth, UnionAuthenticator::Anonymous(_)))
    }

    #[test]
    fn test_factory() {
        let factory = AuthnFactory::new();

        let cfg = AuthnConfig::default();
        let chain = factory.build_authenticator(&cfg);
        assert_eq!(chain.authenticators.len(), 1);
        assert!(!is_anonymous_enabled(&chain));

        let mut cfg = AuthnConfig::default();
        cfg.allow_anonymous = true;
        let chain = factory.build_authenticator(&cfg);
        assert_eq!(chain.authenticators.len(), 2);
        assert!(is_anonymous_enabled(&chain));
    }
}
