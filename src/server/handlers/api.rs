use actix_web::HttpRequest;
use async_trait::async_trait;
use log::debug;

use crate::server::authn::gate::AuthGate;
use crate::server::authz::routes::RouteGuards;
use crate::server::response::Response;
use crate::types::route::WhoamiResponse;

use super::Handler;

pub struct ApiHandler<G: AuthGate> {
    guards: RouteGuards<G>,
}

impl<G: AuthGate> ApiHandler<G> {
    pub fn new(guards: RouteGuards<G>) -> Self {
        Self { guards }
    }

    fn split_api_path(path: &str) -> Result<(&str, Option<&str>), &'static str> {
        let path = path.trim_end_matches('/');
        let mut parts = path.splitn(2, '/');
        let action = match parts.next() {
            Some(action) if !action.is_empty() => action,
            _ => return Err("empty path"),
        };
        let route = parts.next().map(|r| r.trim_matches('/'));
        match route {
            Some(r) if r.is_empty() || r.contains('/') => Err("invalid route name"),
            _ => Ok((action, route)),
        }
    }

    async fn handle_whoami(&self, req: &HttpRequest) -> Response {
        match self.guards.authenticate(req).await {
            Ok(identity) => Response::json(WhoamiResponse { identity }),
            Err(e) => Response::from(&e),
        }
    }

    async fn handle_routes(&self, req: &HttpRequest) -> Response {
        if let Err(e) = self.guards.check_admin(req, "routes").await {
            return Response::from(&e);
        }
        Response::json(self.guards.registry().list_routes())
    }

    async fn handle_check(&self, req: &HttpRequest, route: &str) -> Response {
        match self.guards.check(req, route).await {
            Some(Ok(())) => Response::ok(),
            Some(Err(e)) => {
                debug!("Check route '{route}' rejected: {e}");
                Response::from(&e)
            }
            None => Response::not_found(format!("route '{route}'")),
        }
    }

    async fn handle_cani(&self, req: &HttpRequest, route: &str) -> Response {
        match self.guards.cani(req, route).await {
            Ok(Some(resp)) => Response::json(resp),
            Ok(None) => Response::not_found(format!("route '{route}'")),
            Err(e) => Response::from(&e),
        }
    }
}

#[async_trait(?Send)]
impl<G: AuthGate> Handler for ApiHandler<G> {
    async fn handle(&self, path: &str, req: HttpRequest) -> Response {
        let (action, route) = match Self::split_api_path(path) {
            Ok(parts) => parts,
            Err(msg) => return Response::bad_request(msg),
        };
        debug!(
            "- {} /api/{path}, peer: {:?}",
            req.method(),
            req.peer_addr()
        );

        match (action, route) {
            ("whoami", None) => self.handle_whoami(&req).await,
            ("routes", None) => self.handle_routes(&req).await,
            ("check", Some(route)) => self.handle_check(&req, route).await,
            ("cani", Some(route)) => self.handle_cani(&req, route).await,
            ("whoami", Some(_)) | ("routes", Some(_)) => {
                Response::bad_request(format!("{action} does not take a route"))
            }
            ("check", None) | ("cani", None) => Response::bad_request("route name is required"),
            _ => Response::not_found(format!("api '{action}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::authn::gate::tests::FixedGate;

    #[test]
    fn test_split_api_path() {
        let split = ApiHandler::<FixedGate>::split_api_path;
        assert_eq!(split("whoami"), Ok(("whoami", None)));
        assert_eq!(split("whoami/"), Ok(("whoami", None)));
        assert_eq!(
            split("check/prescription.create"),
            Ok(("check", Some("prescription.create")))
        );
        assert_eq!(split("cani/a/"), Ok(("cani", Some("a"))));
        assert!(split("").is_err());
        assert!(split("check/a/b").is_err());
        assert_eq!(split("check//"), Ok(("check", None)));
    }
}
