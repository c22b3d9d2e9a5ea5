//! Domain types shared across the service and HTTP layers.

pub mod poll;
pub mod user;
