//! Service layer: identifier generation, the file-backed snapshot store,
//! and the poll business rules on top of it.
//! - `storage` owns the in-memory state and its JSON file mirror.
//! - `polls` enforces creation invariants and vote expiry.
//! - Typed errors propagate unchanged to the HTTP boundary.

pub mod errors;
pub mod id;
pub mod polls;
pub mod storage;
