use std::collections::HashMap;

use anyhow::{bail, Result};
use sha2::{Digest, Sha256};

use crate::types::identity::Identity;

use super::config::TokenConfig;

pub trait TokenValidator: Send + Sync {
    /// Resolves a bearer token into the identity it was issued for.
    fn validate_token(&self, token: &str) -> Result<Identity>;
}

/// Validates bearer tokens against a fixed table loaded from configuration.
///
/// Tokens are keyed by their sha256 digest so the configuration never needs
/// to hold the plain value.
pub struct StaticTokenValidator {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenValidator {
    pub fn new(cfgs: &[TokenConfig]) -> Self {
        let tokens = cfgs
            .iter()
            .map(|cfg| (cfg.digest.to_lowercase(), cfg.to_identity()))
            .collect();
        Self { tokens }
    }

    pub fn digest(token: &str) -> String {
        let hash = Sha256::digest(token.as_bytes());
        format!("{:x}", hash)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenValidator for StaticTokenValidator {
    fn validate_token(&self, token: &str) -> Result<Identity> {
        if token.is_empty() {
            bail!("empty token");
        }

        let digest = Self::digest(token);
        match self.tokens.get(&digest) {
            Some(identity) => Ok(identity.clone()),
            None => bail!("unknown token"),
        }
    }
}
