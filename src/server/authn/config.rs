use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig, PathSet};
use crate::types::identity::Identity;

use super::token::StaticTokenValidator;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthnConfig {
    /// Attach an anonymous identity to requests without credentials.
    /// Defaults to false.
    #[serde(default = "AuthnConfig::default_allow_anonymous")]
    pub allow_anonymous: bool,

    /// Role given to anonymous identities. Defaults to "guest".
    #[serde(default = "AuthnConfig::default_anonymous_role")]
    pub anonymous_role: String,

    /// Accepted bearer tokens and the identity each one resolves to.
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

/// A bearer token entry.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TokenConfig {
    /// Plain token value. Converted into `digest` when the config is
    /// completed, never serialized back.
    #[serde(default, skip_serializing)]
    pub token: String,

    /// Sha256 hex digest of the token.
    #[serde(default)]
    pub digest: String,

    pub name: String,

    pub role: String,

    #[serde(default)]
    pub permissions: Vec<String>,
}

impl CommonConfig for AuthnConfig {
    fn default() -> Self {
        Self {
            allow_anonymous: Self::default_allow_anonymous(),
            anonymous_role: Self::default_anonymous_role(),
            tokens: vec![],
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        if self.allow_anonymous && self.anonymous_role.is_empty() {
            bail!("anonymous_role cannot be empty when allow_anonymous is enabled");
        }

        let mut digests = HashSet::new();
        for (idx, token) in self.tokens.iter_mut().enumerate() {
            token.complete(ps).with_context(|| format!("tokens[{idx}]"))?;
            if !digests.insert(token.digest.clone()) {
                bail!("tokens[{idx}]: duplicate token for '{}'", token.name);
            }
        }

        Ok(())
    }
}

impl AuthnConfig {
    pub fn default_allow_anonymous() -> bool {
        false
    }

    pub fn default_anonymous_role() -> String {
        String::from("guest")
    }
}

impl TokenConfig {
    const DIGEST_LENGTH: usize = 64;

    pub fn to_identity(&self) -> Identity {
        Identity::new(&self.name, self.role.as_str()).with_permissions(self.permissions.clone())
    }

    fn complete(&mut self, _ps: &PathSet) -> Result<()> {
        if self.name.is_empty() {
            bail!("name cannot be empty");
        }
        if self.role.is_empty() {
            bail!("role cannot be empty");
        }

        let token = expandenv("token", &self.token)?;
        if !token.is_empty() {
            if !self.digest.is_empty() {
                bail!("token and digest cannot both be set");
            }
            warn!(
                "Plain token configured for '{}', consider using digest instead",
                self.name
            );
            self.digest = StaticTokenValidator::digest(&token);
            self.token = String::new();
        }

        if self.digest.len() != Self::DIGEST_LENGTH
            || !self.digest.chars().all(|c| c.is_ascii_hexdigit())
        {
            bail!("digest must be a sha256 hex string");
        }
        self.digest = self.digest.to_lowercase();

        Ok(())
    }
}
