//! Conversation turn types for the senpai chat relay.
//!
//! A conversation is an ordered sequence of [`Turn`]s keyed by a
//! client-supplied session id. Turns are immutable once appended.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author of a turn in a conversation.
///
/// The wire format uses the Gemini role strings: `"user"` for the human
/// side and `"model"` for the assistant persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Model => write!(f, "model"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "model" => Ok(TurnRole::Model),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single message exchange unit within a conversation.
///
/// Within one session's log, the orchestrator appends turns in
/// user-then-model order for each processed request; the log itself does
/// not enforce alternation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    /// Create a user-authored turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    /// Create a model-authored turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}
