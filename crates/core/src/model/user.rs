use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("user name cannot be empty")]
    EmptyName,

    #[error("user email cannot be empty")]
    EmptyEmail,

    #[error("invalid avatar url: {0}")]
    InvalidAvatar(String),
}

//
// ─── ROLE ──────────────────────────────────────────────────────────────────────
//

/// Access role attached to a user account.
///
/// Roles only tag what a user is; authorization policy beyond the tag is
/// outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Mentor,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "STUDENT"),
            Role::Mentor => write!(f, "MENTOR"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

//
// ─── USER ──────────────────────────────────────────────────────────────────────
//

/// A platform account: learner, mentor, or admin.
///
/// The stored password is an opaque plaintext credential inherited from the
/// persisted format; comparison happens in the user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    avatar: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl User {
    /// Creates a user, validating the display fields and avatar URL.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyName`/`UserError::EmptyEmail` for blank
    /// fields and `UserError::InvalidAvatar` if the avatar does not parse
    /// as a URL.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        avatar: &str,
        password: Option<String>,
    ) -> Result<Self, UserError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserError::EmptyName);
        }
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        let avatar = Url::parse(avatar).map_err(|e| UserError::InvalidAvatar(e.to_string()))?;

        Ok(Self {
            id,
            name,
            email,
            role,
            avatar,
            password,
        })
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn avatar(&self) -> &Url {
        &self.avatar
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the same user with the given password set.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_user(password: Option<String>) -> Result<User, UserError> {
        User::new(
            UserId::new("u1"),
            "Alex Student",
            "alex@lms.com",
            Role::Student,
            "https://picsum.photos/200/200?random=1",
            password,
        )
    }

    #[test]
    fn user_rejects_blank_name() {
        let err = User::new(
            UserId::new("u9"),
            "   ",
            "x@lms.com",
            Role::Student,
            "https://example.com/a.png",
            None,
        )
        .unwrap_err();
        assert_eq!(err, UserError::EmptyName);
    }

    #[test]
    fn user_rejects_unparseable_avatar() {
        let err = User::new(
            UserId::new("u9"),
            "Name",
            "x@lms.com",
            Role::Student,
            "not a url",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, UserError::InvalidAvatar(_)));
    }

    #[test]
    fn with_password_sets_credential() {
        let user = build_user(None).unwrap();
        assert_eq!(user.password(), None);

        let user = user.with_password("secret");
        assert_eq!(user.password(), Some("secret"));
    }

    #[test]
    fn role_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"STUDENT\"");
        assert_eq!(serde_json::to_string(&Role::Mentor).unwrap(), "\"MENTOR\"");
    }

    #[test]
    fn user_serializes_camel_case_and_omits_missing_password() {
        let user = build_user(None).unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "u1");
        assert_eq!(json["role"], "STUDENT");
        assert!(json.get("password").is_none());
    }
}
