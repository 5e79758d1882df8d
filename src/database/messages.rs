use serde::Deserialize;
use std::str::FromStr;

use super::models::{Message, MessageId, UserId};
use super::Database;
use crate::error::{AppError, ValidationError};
use crate::validators::clean_chirp_body;

/// Restricts `list_messages` to one author. `None` or `Some(0)` means all authors.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MessageFilter {
    pub author_id: Option<UserId>,
}

/// Ordering of `list_messages` by message id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ValidationError::InvalidFormat("sort".to_string())),
        }
    }
}

/// Store a new chirp for `author_id` after validating and masking the body
pub fn create_message(db: &Database, body: &str, author_id: UserId) -> Result<Message, AppError> {
    let body = clean_chirp_body(body)?;

    let message = db.transact(|snapshot| {
        let id = snapshot.next_message_id();
        let message = Message {
            id,
            body,
            author_id,
        };
        snapshot.chirps.insert(id, message.clone());
        Ok(message)
    })?;

    tracing::info!(message_id = message.id, author_id = author_id, "Chirp created");
    Ok(message)
}

pub fn get_message(db: &Database, id: MessageId) -> Result<Message, AppError> {
    db.query(|snapshot| {
        snapshot
            .chirps
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("chirp {}", id)))
    })
}

/// All chirps matching `filter`, fully collected and ordered by id
pub fn list_messages(
    db: &Database,
    filter: MessageFilter,
    direction: SortDirection,
) -> Result<Vec<Message>, AppError> {
    let author_id = filter.author_id.filter(|id| *id != 0);

    let mut messages: Vec<Message> = db.query(|snapshot| {
        Ok(snapshot
            .chirps
            .values()
            .filter(|message| author_id.map_or(true, |author| message.author_id == author))
            .cloned()
            .collect())
    })?;

    match direction {
        SortDirection::Asc => messages.sort_by_key(|message| message.id),
        SortDirection::Desc => messages.sort_by(|a, b| b.id.cmp(&a.id)),
    }

    Ok(messages)
}

/// Remove a chirp. Only its author may delete it.
pub fn delete_message(
    db: &Database,
    id: MessageId,
    requesting_user_id: UserId,
) -> Result<(), AppError> {
    db.transact(|snapshot| {
        let message = snapshot
            .chirps
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("chirp {}", id)))?;

        if message.author_id != requesting_user_id {
            tracing::warn!(
                message_id = id,
                user_id = requesting_user_id,
                "Attempt to delete another user's chirp"
            );
            return Err(AppError::Forbidden(format!(
                "chirp {} belongs to another user",
                id
            )));
        }

        snapshot.chirps.remove(&id);
        Ok(())
    })?;

    tracing::info!(message_id = id, user_id = requesting_user_id, "Chirp deleted");
    Ok(())
}
