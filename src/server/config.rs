use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use openssl::ssl::{SslAcceptor, SslAcceptorBuilder, SslFiletype, SslMethod};
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig, PathSet};
use crate::logs::LogConfig;

use super::authn::config::AuthnConfig;
use super::authn::factory::AuthnFactory;
use super::authz::config::AuthzConfig;
use super::authz::factory::AuthzFactory;
use super::handlers::api::ApiHandler;
use super::handlers::healthz::HealthzHandler;
use super::restful::{RestfulContext, RestfulServer};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: String,

    /// Serve HTTPS with `cert.pem` and `key.pem` from the pki directory.
    #[serde(default)]
    pub ssl: bool,

    pub keep_alive_secs: Option<u64>,

    pub workers: Option<u64>,

    #[serde(default = "LogConfig::default")]
    pub log: LogConfig,

    #[serde(default = "AuthnConfig::default")]
    pub authn: AuthnConfig,

    #[serde(default = "AuthzConfig::default")]
    pub authz: AuthzConfig,

    #[serde(skip)]
    pki_path: PathBuf,
}

impl CommonConfig for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
            ssl: false,
            keep_alive_secs: None,
            workers: None,
            log: LogConfig::default(),
            authn: AuthnConfig::default(),
            authz: AuthzConfig::default(),
            pki_path: PathBuf::new(),
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        self.bind = expandenv("bind", &self.bind)?;
        if self.bind.is_empty() {
            bail!("bind cannot be empty");
        }

        if let Some(keep_alive_secs) = self.keep_alive_secs {
            if keep_alive_secs == 0 {
                bail!("keep_alive_secs must be greater than 0");
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                bail!("workers must be greater than 0");
            }
        }

        self.log.complete(ps).context("log")?;
        self.authn.complete(ps).context("authn")?;
        self.authz.complete(ps).context("authz")?;

        self.pki_path = ps.pki_path.clone();

        Ok(())
    }
}

impl ServerConfig {
    pub fn default_bind() -> String {
        String::from("127.0.0.1:7890")
    }

    pub fn build_ctx(&self) -> Arc<RestfulContext> {
        let gate = AuthnFactory::new().build_gate(&self.authn);
        let guards = AuthzFactory::new().build_route_guards(&self.authz, Arc::new(gate));

        Arc::new(RestfulContext {
            api_handler: ApiHandler::new(guards),
            healthz_handler: HealthzHandler::new(),
        })
    }

    pub fn build_restful_server(&self) -> Result<RestfulServer> {
        let ctx = self.build_ctx();
        let mut srv = RestfulServer::new(self.bind.clone(), ctx);
        if self.ssl {
            let ssl = self.build_ssl()?;
            srv.set_ssl(ssl);
        }

        if let Some(keep_alive_secs) = self.keep_alive_secs {
            srv.set_keep_alive_secs(keep_alive_secs);
        }

        if let Some(workers) = self.workers {
            srv.set_workers(workers);
        }

        Ok(srv)
    }

    fn build_ssl(&self) -> Result<SslAcceptorBuilder> {
        let key_path = self.pki_path.join("key.pem");
        if !key_path.exists() {
            bail!("ssl key file not exists: {:?}", key_path);
        }

        let cert_path = self.pki_path.join("cert.pem");
        if !cert_path.exists() {
            bail!("ssl cert file not exists: {:?}", cert_path);
        }

        let mut builder =
            SslAcceptor::mozilla_intermediate(SslMethod::tls()).context("init ssl acceptor")?;

        builder
            .set_private_key_file(&key_path, SslFiletype::PEM)
            .context("load ssl key file")?;
        builder
            .set_certificate_chain_file(&cert_path)
            .context("load ssl cert file")?;

        Ok(builder)
    }
}
