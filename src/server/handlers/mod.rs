pub mod api;
pub mod healthz;

use actix_web::HttpRequest;
use async_trait::async_trait;

use super::response::Response;

#[async_trait(?Send)]
pub trait Handler {
    async fn handle(&self, path: &str, req: HttpRequest) -> Response;
}
