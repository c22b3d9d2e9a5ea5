use serde::{Deserialize, Serialize};

/// An account that can log in and vote.
///
/// Passwords are stored in the clear; this mirrors the data file format and
/// is a documented weakness, not a pattern to extend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
}
