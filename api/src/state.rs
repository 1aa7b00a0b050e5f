//! Application state shared across axum route handlers.

use crate::auth::SessionStore;
use mongodb::Database;

/// Central application state: the document-database handle plus the
/// process-local registry of live admin sessions.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            sessions: SessionStore::new(),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
