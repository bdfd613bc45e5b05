use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::web::{self, Data, ServiceConfig};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use log::{info, warn};
use openssl::ssl::SslAcceptorBuilder;
use sd_notify::NotifyState;

use crate::types::response::CommonResponse;

use super::authn::chain::ChainAuthenticator;
use super::authn::gate::AuthnGate;
use super::authn::token::StaticTokenValidator;
use super::handlers::api::ApiHandler;
use super::handlers::healthz::HealthzHandler;
use super::handlers::Handler;
use super::response::Response;

/// The authentication gate the server runs with.
pub type ServerGate = AuthnGate<ChainAuthenticator<StaticTokenValidator>>;

pub struct RestfulServer {
    ssl: Option<SslAcceptorBuilder>,
    ctx: Arc<RestfulContext>,

    keep_alive_secs: Option<u64>,
    workers: Option<u64>,

    bind: String,
}

pub struct RestfulContext {
    pub api_handler: ApiHandler<ServerGate>,
    pub healthz_handler: HealthzHandler,
}

impl RestfulServer {
    const API_PATH: &'static str = "/api";
    const HEALTHZ_PATH: &'static str = "/healthz";

    pub fn new(bind: String, ctx: Arc<RestfulContext>) -> Self {
        Self {
            ssl: None,
            ctx,
            keep_alive_secs: None,
            workers: None,
            bind,
        }
    }

    pub fn set_ssl(&mut self, ssl: SslAcceptorBuilder) {
        self.ssl = Some(ssl);
    }

    pub fn set_keep_alive_secs(&mut self, keep_alive_secs: u64) {
        self.keep_alive_secs = Some(keep_alive_secs);
    }

    pub fn set_workers(&mut self, workers: u64) {
        self.workers = Some(workers);
    }

    /// Registers every route of the server on `cfg`.
    pub fn configure(cfg: &mut ServiceConfig, ctx: Arc<RestfulContext>) {
        cfg.app_data(Data::new(ctx))
            .service(
                web::scope(Self::API_PATH).route("/{path:.*}", web::get().to(Self::handle_api)),
            )
            .service(web::resource(Self::HEALTHZ_PATH).route(web::get().to(Self::handle_healthz)));
    }

    pub async fn run(mut self) -> Result<()> {
        let ctx = self.ctx.clone();
        let mut srv = HttpServer::new(move || {
            let ctx = ctx.clone();
            App::new()
                .configure(move |cfg| Self::configure(cfg, ctx))
                .default_service(web::route().to(Self::default_handler))
        });

        if let Some(ssl) = self.ssl.take() {
            info!("Binding to https://{}", self.bind);
            srv = srv.bind_openssl(&self.bind, ssl).context("bind with ssl")?
        } else {
            warn!("Using HTTP (without SSL). THIS IS DANGEROUS, DO NOT USE IN PRODUCTION");
            info!("Binding to http://{}", self.bind);
            srv = srv.bind(&self.bind).context("bind without ssl")?
        };

        if let Some(keep_alive) = self.keep_alive_secs {
            srv = srv.keep_alive(Duration::from_secs(keep_alive));
        }
        if let Some(workers) = self.workers {
            srv = srv.workers(workers as usize);
        }

        sd_notify::notify(true, &[NotifyState::Ready]).context("notify systemd")?;
        info!("Starting restful server");
        srv.run().await.context("run server")?;

        info!("Server stopped by user");
        Ok(())
    }

    async fn handle_api(req: HttpRequest, ctx: Data<Arc<RestfulContext>>) -> HttpResponse {
        let path = match Self::parse_path(Self::API_PATH, &req) {
            Some(path) => path,
            None => return Response::bad_request("Api name is required").into(),
        };

        ctx.api_handler.handle(&path, req).await.into()
    }

    async fn handle_healthz(req: HttpRequest, ctx: Data<Arc<RestfulContext>>) -> HttpResponse {
        ctx.healthz_handler.handle("", req).await.into()
    }

    async fn default_handler(req: HttpRequest) -> HttpResponse {
        let path = req.uri().path().to_string();
        let method = req.method().as_str().to_string();
        let message = format!("No route to {method} {path}");
        let ret = CommonResponse {
            code: StatusCode::NOT_FOUND.into(),
            message: Some(message),
        };
        HttpResponse::NotFound().json(ret)
    }

    fn parse_path(route: &str, req: &HttpRequest) -> Option<String> {
        let path = req.uri().path().to_string();
        let path = path.strip_prefix(route)?;
        let path = path.trim_matches('/');
        if path.is_empty() {
            return None;
        }

        Some(String::from(path))
    }
}
