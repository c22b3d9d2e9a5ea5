//! File-backed persistence for the poll snapshot.

pub mod snapshot_store;
