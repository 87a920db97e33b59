//! In-process conversation store keyed by session id.
//!
//! Each session owns one ordered log of [`Turn`]s. Logs are created lazily
//! on first read or write, mutated only by appends, and destroyed only by
//! an explicit delete. Store lifetime is process lifetime -- there is no
//! persistence across restarts.
//!
//! DashMap gives per-entry locking, so operations on different session ids
//! never block one another. Same-session serialization across the remote
//! generation call is the orchestrator's job, not the store's.

use dashmap::DashMap;

use senpai_types::chat::{Turn, TurnRole};

/// Concurrent map of session id to conversation log.
#[derive(Debug, Default)]
pub struct ConversationStore {
    logs: DashMap<String, Vec<Turn>>,
}

impl ConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the log for a session, creating an empty log if the
    /// session has not been seen before. Never fails.
    pub fn history(&self, session_id: &str) -> Vec<Turn> {
        self.logs
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Append one turn to a session's log, creating the log if absent.
    pub fn append_turn(&self, session_id: &str, role: TurnRole, text: impl Into<String>) {
        self.logs
            .entry(session_id.to_string())
            .or_default()
            .push(Turn {
                role,
                text: text.into(),
            });
    }

    /// Append a completed user/model exchange to a session's log.
    ///
    /// Both turns are pushed under a single entry guard, so no concurrent
    /// reader observes a log containing the user turn without its reply.
    pub fn append_exchange(
        &self,
        session_id: &str,
        prompt: impl Into<String>,
        reply: impl Into<String>,
    ) {
        let mut log = self.logs.entry(session_id.to_string()).or_default();
        log.push(Turn::user(prompt));
        log.push(Turn::model(reply));
    }

    /// Remove a session's log entirely.
    ///
    /// Returns `true` if a log existed and was removed. A missing session
    /// is a normal, reportable outcome, not a failure.
    pub fn delete_session(&self, session_id: &str) -> bool {
        self.logs.remove(session_id).is_some()
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.logs.len()
    }
}
