use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};

use models::poll::{Poll, PollOption};
use models::user::User;

use crate::errors::ServiceError;
use crate::id;
use crate::storage::snapshot_store::SnapshotStore;

/// Poll creation input as bound from the HTTP layer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePollInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub options: Vec<String>,
    pub end_at: DateTime<Utc>,
}

/// Business rules on top of the snapshot store: creation invariants and
/// vote expiry. Duplicate-vote and option checks live in the store, where
/// they run under the write lock.
pub struct PollService {
    store: Arc<SnapshotStore>,
}

impl PollService {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    /// Create a poll: requires at least two options, assigns a fresh id to
    /// the poll and one per option preserving input order, stamps the
    /// creation time, and persists.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_poll(&self, input: CreatePollInput) -> Result<Poll, ServiceError> {
        if input.options.len() < 2 {
            return Err(ServiceError::Validation(
                "a poll needs at least two options".into(),
            ));
        }

        let options = input
            .options
            .into_iter()
            .map(|text| PollOption { id: id::generate(), text })
            .collect();

        let poll = Poll {
            id: id::generate(),
            title: input.title,
            description: input.description,
            options,
            created_at: Utc::now(),
            end_at: input.end_at,
            votes: HashMap::new(),
        };

        self.store.create_poll(poll.clone()).await?;
        info!(poll_id = %poll.id, "poll created");
        Ok(poll)
    }

    pub async fn get_all_polls(&self) -> Vec<Poll> {
        self.store.get_all_polls().await
    }

    pub async fn get_poll(&self, id: &str) -> Result<Poll, ServiceError> {
        self.store
            .get_poll(id)
            .await
            .ok_or_else(|| ServiceError::not_found("poll"))
    }

    /// Record a vote, rejecting polls past their end time.
    ///
    /// The expiry check and the store mutation take the lock separately, so
    /// a poll can close in between; the window admits at most one late vote
    /// and is accepted behaviour.
    pub async fn vote(
        &self,
        poll_id: &str,
        user_id: &str,
        option_id: &str,
    ) -> Result<(), ServiceError> {
        let poll = self.get_poll(poll_id).await?;
        if poll.is_closed_at(Utc::now()) {
            return Err(ServiceError::PollClosed);
        }
        self.store.vote(poll_id, user_id, option_id).await
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        self.store.authenticate(username, password).await
    }
}
