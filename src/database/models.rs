use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type MessageId = i64;
pub type UserId = i64;

/// A posted chirp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub body: String,
    pub author_id: UserId,
}

/// A registered account. `password_hash` is a bcrypt hash, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_chirpy_red: bool,
}

/// A long-lived opaque credential, revoked by moving `expires_at` to the past
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Usable only strictly before `expires_at`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Last identifier handed out per entity type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    #[serde(default)]
    pub chirps: i64,
    #[serde(default)]
    pub users: i64,
}

/// The complete persisted state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub chirps: BTreeMap<MessageId, Message>,
    #[serde(default)]
    pub users: BTreeMap<UserId, User>,
    #[serde(default)]
    pub tokens: BTreeMap<String, RefreshToken>,
    #[serde(default)]
    pub sequences: Sequences,
}

impl Snapshot {
    /// Next message id. Never reuses an id, even after deletes.
    pub fn next_message_id(&mut self) -> MessageId {
        let highest = self.chirps.keys().next_back().copied().unwrap_or(0);
        let id = self.sequences.chirps.max(highest) + 1;
        self.sequences.chirps = id;
        id
    }

    pub fn next_user_id(&mut self) -> UserId {
        let highest = self.users.keys().next_back().copied().unwrap_or(0);
        let id = self.sequences.users.max(highest) + 1;
        self.sequences.users = id;
        id
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_ids_are_monotonic_across_deletes() {
        let mut snapshot = Snapshot::default();

        let first = snapshot.next_message_id();
        snapshot.chirps.insert(
            first,
            Message {
                id: first,
                body: "hi".to_string(),
                author_id: 1,
            },
        );
        snapshot.chirps.remove(&first);

        assert_eq!(first, 1);
        assert_eq!(snapshot.next_message_id(), 2);
    }

    #[test]
    fn test_user_ids_independent_from_message_ids() {
        let mut snapshot = Snapshot::default();
        snapshot.next_message_id();
        snapshot.next_message_id();

        assert_eq!(snapshot.next_user_id(), 1);
    }

    #[test]
    fn test_refresh_token_validity_boundary() {
        let now = Utc::now();
        let token = RefreshToken {
            token: "abc".to_string(),
            user_id: 1,
            issued_at: now - Duration::days(1),
            expires_at: now,
        };

        assert!(!token.is_valid_at(now));
        assert!(token.is_valid_at(now - Duration::seconds(1)));
    }
}
