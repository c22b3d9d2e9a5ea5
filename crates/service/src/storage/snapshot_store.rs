use std::{collections::HashMap, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{error, info};

use models::{poll::Poll, user::User};

use crate::errors::ServiceError;
use crate::id;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

/// Complete persisted state: all polls and all users, keyed by id.
/// The snapshot is the unit of persistence; every mutation rewrites the
/// whole file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub polls: HashMap<String, Poll>,
    pub users: HashMap<String, User>,
}

/// JSON file-backed store for polls and users.
///
/// A single `RwLock` guards the in-memory snapshot. Mutations hold the
/// write half across both the map update and the file rewrite, so no two
/// writers' snapshots can interleave on disk; a slow disk stalls later
/// writers and, for the duration of the write, readers too.
///
/// A failed file write does NOT roll back the in-memory change; memory and
/// disk may diverge until the next successful write.
pub struct SnapshotStore {
    inner: RwLock<Snapshot>,
    file_path: PathBuf,
}

impl SnapshotStore {
    /// Load the store from `path`, starting empty if the file is missing.
    ///
    /// An unparseable file yields [`ServiceError::MalformedStore`]; callers
    /// must treat that as fatal rather than discard the data. After loading,
    /// a bootstrap admin user is created and persisted if absent.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let snapshot = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::MalformedStore(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(ServiceError::Persistence(e.to_string())),
        };

        let store = Arc::new(Self { inner: RwLock::new(snapshot), file_path });
        store.ensure_admin().await?;
        Ok(store)
    }

    /// Insert the poll keyed by its id and persist. An existing id is
    /// silently overwritten; callers must use generated ids.
    pub async fn create_poll(&self, poll: Poll) -> Result<(), ServiceError> {
        let mut snapshot = self.inner.write().await;
        snapshot.polls.insert(poll.id.clone(), poll);
        self.save(&snapshot).await
    }

    pub async fn get_poll(&self, id: &str) -> Option<Poll> {
        let snapshot = self.inner.read().await;
        snapshot.polls.get(id).cloned()
    }

    /// All polls, in map enumeration order (not insertion order).
    pub async fn get_all_polls(&self) -> Vec<Poll> {
        let snapshot = self.inner.read().await;
        snapshot.polls.values().cloned().collect()
    }

    /// Record a vote by `user_id` on `poll_id` for the option carrying
    /// `option_id`.
    ///
    /// Fails with `NotFound` if the poll is absent, `AlreadyVoted` if the
    /// user already appears in the votes map, and `InvalidOption` if no
    /// option matches; the votes map is left untouched in every failure
    /// case. On success the option's index is recorded and the snapshot
    /// persisted.
    pub async fn vote(
        &self,
        poll_id: &str,
        user_id: &str,
        option_id: &str,
    ) -> Result<(), ServiceError> {
        let mut snapshot = self.inner.write().await;

        let poll = snapshot
            .polls
            .get_mut(poll_id)
            .ok_or_else(|| ServiceError::not_found("poll"))?;

        if poll.votes.contains_key(user_id) {
            return Err(ServiceError::AlreadyVoted);
        }

        let option_index = poll
            .options
            .iter()
            .position(|option| option.id == option_id)
            .ok_or(ServiceError::InvalidOption)?;

        poll.votes.insert(user_id.to_string(), option_index);
        self.save(&snapshot).await
    }

    /// Linear scan for the first user matching both username and password.
    /// Usernames are unique by convention only; first match wins.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let snapshot = self.inner.read().await;
        snapshot
            .users
            .values()
            .find(|user| user.username == username && user.password == password)
            .cloned()
    }

    async fn ensure_admin(&self) -> Result<(), ServiceError> {
        let mut snapshot = self.inner.write().await;
        if snapshot.users.values().any(|user| user.username == ADMIN_USERNAME) {
            return Ok(());
        }

        let admin = User {
            id: id::generate(),
            username: ADMIN_USERNAME.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        };
        info!(user_id = %admin.id, "bootstrapping admin user");
        snapshot.users.insert(admin.id.clone(), admin);
        self.save(&snapshot).await
    }

    /// Rewrite the backing file from the given snapshot, pretty-printed.
    /// Always called with the write guard held.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| ServiceError::Persistence(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "snapshot write failed");
            ServiceError::Persistence(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use models::poll::PollOption;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("snapshot_store_{}.json", Uuid::new_v4()))
    }

    fn sample_poll(id: &str) -> Poll {
        Poll {
            id: id.to_string(),
            title: "favorite color".into(),
            description: "pick one".into(),
            options: vec![
                PollOption { id: "opt-red".into(), text: "Red".into() },
                PollOption { id: "opt-blue".into(), text: "Blue".into() },
            ],
            created_at: Utc::now(),
            end_at: Utc::now() + Duration::hours(1),
            votes: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn open_bootstraps_admin_once() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = SnapshotStore::open(&tmp).await?;
        let admin = store.authenticate("admin", "admin123").await.unwrap();

        // reopen: same admin, no duplicate
        let reloaded = SnapshotStore::open(&tmp).await?;
        let again = reloaded.authenticate("admin", "admin123").await.unwrap();
        assert_eq!(admin.id, again.id);
        {
            let snapshot = reloaded.inner.read().await;
            assert_eq!(snapshot.users.len(), 1);
        }

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_file() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = SnapshotStore::open(&tmp).await?;

        store.create_poll(sample_poll("p1")).await?;
        store.create_poll(sample_poll("p2")).await?;
        store.vote("p1", "u1", "opt-blue").await?;

        let reloaded = SnapshotStore::open(&tmp).await?;
        let p1 = reloaded.get_poll("p1").await.unwrap();
        assert_eq!(p1.votes.get("u1"), Some(&1));
        assert_eq!(p1.options.len(), 2);
        assert_eq!(reloaded.get_all_polls().await.len(), 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn vote_rejects_duplicates_and_unknown_options() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = SnapshotStore::open(&tmp).await?;
        store.create_poll(sample_poll("p1")).await?;

        store.vote("p1", "u1", "opt-red").await?;
        assert!(matches!(
            store.vote("p1", "u1", "opt-blue").await,
            Err(ServiceError::AlreadyVoted)
        ));
        assert!(matches!(
            store.vote("p1", "u2", "opt-green").await,
            Err(ServiceError::InvalidOption)
        ));
        assert!(matches!(
            store.vote("missing", "u2", "opt-red").await,
            Err(ServiceError::NotFound(_))
        ));

        // failed attempts left the votes map untouched
        let poll = store.get_poll("p1").await.unwrap();
        assert_eq!(poll.votes.len(), 1);
        assert_eq!(poll.votes.get("u1"), Some(&0));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_is_fatal() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, b"{ not json").await?;

        let result = SnapshotStore::open(&tmp).await;
        assert!(matches!(result, Err(ServiceError::MalformedStore(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn authenticate_requires_exact_match() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = SnapshotStore::open(&tmp).await?;

        assert!(store.authenticate("admin", "wrong").await.is_none());
        assert!(store.authenticate("nobody", "admin123").await.is_none());
        assert!(store.authenticate("admin", "admin123").await.is_some());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
