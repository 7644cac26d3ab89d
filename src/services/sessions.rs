// src/services/sessions.rs

use std::collections::HashMap;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::session::TestSession;

/// Live test sessions keyed by the caller's token.
///
/// A token holds at most one session. Starting again under the same token
/// replaces the previous session; submitting takes it out.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, TestSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `session` under `token`, or under a fresh token when none is given.
    /// Returns the token the session now lives under.
    pub async fn open(&self, token: Option<Uuid>, session: TestSession) -> Uuid {
        let token = token.unwrap_or_else(Uuid::new_v4);
        let previous = self.sessions.lock().await.insert(token, session);
        if let Some(prev) = previous {
            tracing::debug!(
                "Session {} replaced unfinished test {}/{} for {}",
                token,
                prev.kit,
                prev.level,
                prev.teacher_name
            );
        }
        token
    }

    /// Removes and returns the session for `token`, if any.
    pub async fn take(&self, token: &Uuid) -> Option<TestSession> {
        self.sessions.lock().await.remove(token)
    }

    /// Puts back a session taken for a submit that failed.
    /// Does nothing if the caller has started a new test in the meantime.
    pub async fn restore(&self, token: Uuid, session: TestSession) {
        self.sessions.lock().await.entry(token).or_insert(session);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
