//! HTTP surface: routing, request binding, auth middleware, and the
//! mapping from service errors to JSON responses.

pub mod auth;
pub mod errors;
pub mod polls;
pub mod routes;
pub mod startup;

pub use startup::run;
