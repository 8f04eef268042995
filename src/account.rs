use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AccountError, SessionStore};

/// A stored user profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub tz: String,
    pub apps_lib: Option<serde_json::Value>,
    pub dob: NaiveDate,
    pub is_active: bool,
}

impl User {
    /// A fresh profile with the storage defaults.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            email: None,
            name: None,
            tz: "UTC".to_owned(),
            apps_lib: None,
            dob: NaiveDate::default(),
            is_active: true,
        }
    }
}

/// Profile fields a user may change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub tz: String,
    pub apps_lib: Option<serde_json::Value>,
    pub dob: NaiveDate,
}

pub trait UserStore: Send + Sync {
    fn get_user(&self, user_id: i64) -> Option<User>;
    fn update_user(&self, user_id: i64, update: UpdateUser) -> Result<(), AccountError>;
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.id, user);
    }
}

impl UserStore for InMemoryUserStore {
    fn get_user(&self, user_id: i64) -> Option<User> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        users.get(&user_id).cloned()
    }

    fn update_user(&self, user_id: i64, update: UpdateUser) -> Result<(), AccountError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        let user = users
            .get_mut(&user_id)
            .ok_or(AccountError::UserNotFound(user_id))?;
        user.email = update.email;
        user.name = update.name;
        user.tz = update.tz;
        user.apps_lib = update.apps_lib;
        user.dob = update.dob;
        Ok(())
    }
}

/// Account operations behind injected user and session stores.
#[derive(Clone)]
pub struct Accounts {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
}

impl Accounts {
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// The active user signed in with `session_id`.
    pub fn current_user(&self, session_id: &str) -> Option<User> {
        let user_id = self.sessions.user_id(session_id)?;
        self.users.get_user(user_id).filter(|user| user.is_active)
    }

    pub fn get_user(&self, user_id: i64) -> Result<User, AccountError> {
        self.users
            .get_user(user_id)
            .ok_or(AccountError::UserNotFound(user_id))
    }

    pub fn update_user(&self, user_id: i64, update: UpdateUser) -> Result<(), AccountError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(user_id, ?update, "updating user");

        let result = self.users.update_user(user_id, update);

        #[cfg(feature = "tracing")]
        tracing::debug!(user_id, ?result, "update_user returned");

        result
    }
}
