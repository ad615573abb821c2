use std::sync::Arc;

use lms_core::model::User;
use storage::{KeyValueGateway, keys, load_or, save};

use crate::catalog;
use crate::error::UserServiceError;

/// Credential applied to accounts added without one, matching the demo
/// accounts shipped in the catalog.
pub const DEFAULT_PASSWORD: &str = "JaiShreeram";

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Account listing, registration, and the login check.
pub struct UserService {
    kv: Arc<dyn KeyValueGateway>,
}

impl UserService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueGateway>) -> Self {
        Self { kv }
    }

    /// All accounts, falling back to the demo accounts for a fresh store.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` on backend failure.
    pub async fn list(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(load_or(self.kv.as_ref(), keys::USERS, catalog::default_users()).await?)
    }

    /// Appends an account, applying the default password when the record
    /// carries none, and returns the updated collection.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` on backend failure.
    pub async fn add_user(&self, user: User) -> Result<Vec<User>, UserServiceError> {
        let mut users = self.list().await?;

        let user = if user.password().is_none() {
            user.with_password(DEFAULT_PASSWORD)
        } else {
            user
        };
        users.push(user);

        save(self.kv.as_ref(), keys::USERS, &users).await?;
        Ok(users)
    }

    /// Looks up an account by case-insensitive email and exact password.
    ///
    /// A failed lookup is a steady state, reported as `None` rather than an
    /// error. The comparison is plaintext, inherited from the persisted
    /// format.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` on backend failure.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, UserServiceError> {
        let users = self.list().await?;
        Ok(users.into_iter().find(|user| {
            user.email().eq_ignore_ascii_case(email) && user.password() == Some(password)
        }))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
