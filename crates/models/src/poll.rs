use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question with a fixed set of options and a closing time.
///
/// `votes` maps voter id to the index of the chosen option; every recorded
/// index is valid for `options` at the time it was written, and a voter id
/// appears at most once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub title: String,
    pub description: String,
    pub options: Vec<PollOption>,
    pub created_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub votes: HashMap<String, usize>,
}

/// One selectable choice, identified independently of its display text.
/// Options are fixed at poll creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
}

impl Poll {
    /// Vote tallies aligned by option index. Out-of-range indices are
    /// skipped rather than panicking on a hand-edited data file.
    pub fn vote_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.options.len()];
        for &index in self.votes.values() {
            if index < counts.len() {
                counts[index] += 1;
            }
        }
        counts
    }

    pub fn is_closed_at(&self, now: DateTime<Utc>) -> bool {
        now > self.end_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn poll(votes: &[(&str, usize)]) -> Poll {
        Poll {
            id: "p1".into(),
            title: "colors".into(),
            description: String::new(),
            options: vec![
                PollOption { id: "o1".into(), text: "Red".into() },
                PollOption { id: "o2".into(), text: "Blue".into() },
            ],
            created_at: Utc::now(),
            end_at: Utc::now() + Duration::hours(1),
            votes: votes.iter().map(|(u, i)| (u.to_string(), *i)).collect(),
        }
    }

    #[test]
    fn vote_counts_align_with_option_index() {
        let p = poll(&[("u1", 1), ("u2", 1), ("u3", 0)]);
        assert_eq!(p.vote_counts(), vec![1, 2]);
    }

    #[test]
    fn vote_counts_skip_out_of_range_indices() {
        let p = poll(&[("u1", 7)]);
        assert_eq!(p.vote_counts(), vec![0, 0]);
    }

    #[test]
    fn closed_only_after_end_time() {
        let p = poll(&[]);
        assert!(!p.is_closed_at(Utc::now()));
        assert!(p.is_closed_at(p.end_at + Duration::seconds(1)));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let p = poll(&[("u1", 0)]);
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("created_at").is_some());
        assert!(value.get("end_at").is_some());
        assert_eq!(value["options"][0]["text"], "Red");
        assert_eq!(value["votes"]["u1"], 0);
    }
}
