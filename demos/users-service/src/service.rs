//! The in-memory users service.

use std::time::Duration;

use apiary::core::{ApiError, ResponseWriter};
use apiary::server::ShutdownSignal;
use parking_lot::RwLock;

use crate::model::{User, UserId};

/// Delay between answering `POST /shutdown` and stopping the server.
pub const SHUTDOWN_DELAY: Duration = Duration::from_secs(1);

/// Users held in memory, plus the server's shutdown handle.
#[derive(Debug)]
pub struct UserService {
    users: RwLock<Vec<User>>,
    shutdown: ShutdownSignal,
}

impl UserService {
    /// Creates a service holding `users`.
    pub fn new(users: Vec<User>, shutdown: ShutdownSignal) -> Self {
        Self {
            users: RwLock::new(users),
            shutdown,
        }
    }

    /// Creates a service preloaded with Alice (1) and Bob (2).
    pub fn seeded(shutdown: ShutdownSignal) -> Self {
        Self::new(vec![User::new(1, "Alice"), User::new(2, "Bob")], shutdown)
    }

    /// Returns the signal `shutdown` triggers.
    pub fn shutdown_signal(&self) -> &ShutdownSignal {
        &self.shutdown
    }

    /// Looks up one user.
    pub fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.users
            .read()
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("user {id} not found")))
    }

    /// Avatars are not stored, so this always fails.
    pub fn get_avatar(&self, id: UserId) -> Result<Vec<u8>, ApiError> {
        Err(ApiError::not_found(format!("avatar {id} not found")))
    }

    /// Stores a new user. Success is reported as 201 through the error
    /// channel.
    pub fn create_user(&self, user: User) -> Result<(), ApiError> {
        let mut users = self.users.write();
        if users.iter().any(|existing| existing.id == user.id) {
            return Err(ApiError::conflict(format!("user {} already exists", user.id)));
        }

        let id = user.id;
        users.push(user);
        tracing::info!(user_id = %id, "user created");
        Err(ApiError::created(format!("user {id} created")))
    }

    /// Returns every user in insertion order.
    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.users.read().clone())
    }

    /// Answers first, then stops the server after [`SHUTDOWN_DELAY`].
    pub fn shutdown(&self, out: &ResponseWriter) {
        out.write_str("Shutting down...\n");
        self.shutdown.trigger_after(SHUTDOWN_DELAY);
    }
}
