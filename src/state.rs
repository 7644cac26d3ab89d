// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, services::sessions::SessionRegistry, store::QuizStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuizStore>,
    pub sessions: Arc<SessionRegistry>,
    pub config: Config,
    /// Argon2 hash of the admin password.
    pub admin_password_hash: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn QuizStore>, config: Config, admin_password_hash: String) -> Self {
        Self {
            store,
            sessions: Arc::new(SessionRegistry::new()),
            config,
            admin_password_hash: admin_password_hash.into(),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
