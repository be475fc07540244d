//! Assistant transcript — the persisted message log.
//!
//! Lives under its own durable key, separate from presets. Absent or
//! corrupt data resets to an empty transcript (no crash), matching the
//! recoverable-read contract of the storage port. Appends persist
//! immediately so the transcript survives a restart and redisplays when
//! the assistant reopens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::StoragePort;

/// Durable record key for the transcript.
pub const TRANSCRIPT_KEY: &str = "transcript";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "you"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One transcript entry. `suggestions` are the clickable follow-up pills
/// offered with an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

pub struct Transcript {
    port: Box<dyn StoragePort>,
    messages: Vec<Message>,
    next_id: u64,
}

impl fmt::Debug for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transcript")
            .field("messages", &self.messages)
            .finish()
    }
}

impl Transcript {
    /// Open the transcript from its durable record. Missing, corrupt, or
    /// unreadable data starts an empty transcript, never a crash.
    pub fn open(port: Box<dyn StoragePort>) -> Self {
        let messages = match port.read(TRANSCRIPT_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<Message>>(&text) {
                Ok(messages) => messages,
                Err(err) => {
                    eprintln!("WARN: malformed transcript record ({}), starting empty", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                eprintln!("WARN: failed to read transcript ({}), starting empty", err);
                Vec::new()
            }
        };
        let next_id = messages.iter().map(|m| m.id + 1).max().unwrap_or(1);
        Self {
            port,
            messages,
            next_id,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message and persist. A persistence failure keeps the
    /// message in memory and logs a warning.
    pub fn push(&mut self, role: Role, text: String, suggestions: Vec<String>) -> &Message {
        let message = Message {
            id: self.next_id,
            role,
            text,
            suggestions,
        };
        self.next_id += 1;
        let index = self.messages.len();
        self.messages.push(message);
        self.persist();
        &self.messages[index]
    }

    fn persist(&mut self) {
        match serde_json::to_string_pretty(&self.messages) {
            Ok(text) => {
                if let Err(err) = self.port.write(TRANSCRIPT_KEY, &text) {
                    eprintln!("WARN: failed to persist transcript ({})", err);
                }
            }
            Err(err) => eprintln!("WARN: failed to serialize transcript ({})", err),
        }
    }
}
