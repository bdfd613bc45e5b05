pub mod healthz;
pub mod identity;
pub mod response;
pub mod route;
