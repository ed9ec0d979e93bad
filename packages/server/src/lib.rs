// AdoptLink - API Core
//
// Backend for the adoption-management workflow: parent registration with
// optional child linking, child records, visits, documents and dashboards.
// Each domain owns its models (SQL) and actions (business logic); the server
// module exposes them over HTTP.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
