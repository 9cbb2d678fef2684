use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const USER_CREATED: &str = "user.created";
pub const USER_DELETED: &str = "user.deleted";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed webhook payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Envelope shared by every Clerk event. Only `type` and `data` are read.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct UserCreatedData {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct UserDeletedData {
    #[serde(default)]
    id: Option<String>,
}

/// A verified Clerk event, narrowed to the types this service acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClerkEvent {
    UserCreated { id: String },
    /// Clerk may omit the id on deletion payloads.
    UserDeleted { id: Option<String> },
    Unhandled { event_type: String },
}

impl ClerkEvent {
    pub fn from_slice(body: &[u8]) -> Result<Self, EventError> {
        let raw: RawEvent = serde_json::from_slice(body)?;

        let event = match raw.event_type.as_str() {
            USER_CREATED => {
                let data: UserCreatedData = serde_json::from_value(raw.data)?;
                ClerkEvent::UserCreated { id: data.id }
            }
            USER_DELETED => {
                let data: UserDeletedData = if raw.data.is_null() {
                    UserDeletedData::default()
                } else {
                    serde_json::from_value(raw.data)?
                };
                ClerkEvent::UserDeleted { id: data.id }
            }
            _ => ClerkEvent::Unhandled {
                event_type: raw.event_type,
            },
        };

        Ok(event)
    }

    pub fn event_type(&self) -> &str {
        match self {
            ClerkEvent::UserCreated { .. } => USER_CREATED,
            ClerkEvent::UserDeleted { .. } => USER_DELETED,
            ClerkEvent::Unhandled { event_type } => event_type,
        }
    }
}
