mod handlers;
mod response;

pub mod authn;
pub mod authz;
pub mod config;
pub mod error;
pub mod restful;
