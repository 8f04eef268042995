use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

/// Maps opaque session tokens to signed-in user IDs.
///
/// Handlers receive an implementation explicitly instead of reading a
/// process-wide login manager.
pub trait SessionStore: Send + Sync {
    /// User bound to `session_id`, if the session is live.
    fn user_id(&self, session_id: &str) -> Option<i64>;
    /// Opens a session for `user_id` and returns its token.
    fn login(&self, user_id: i64) -> String;
    /// Drops the session. Unknown tokens are ignored.
    fn logout(&self, session_id: &str);
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, i64>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn user_id(&self, session_id: &str) -> Option<i64> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(session_id).copied()
    }

    fn login(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(token.clone(), user_id);
        token
    }

    fn logout(&self, session_id: &str) {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(session_id);
    }
}
