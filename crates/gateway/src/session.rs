//! Explicit caller session.
//!
//! A [`Session`] is passed by reference into every gateway call. There is
//! no ambient current user; whoever drives the workflows decides which
//! session they run under.

use std::fmt;

#[derive(Clone, Default)]
pub struct Session {
    access_token: Option<String>,
    username: Option<String>,
    role: Option<String>,
}

impl Session {
    /// A session with no credentials. Requests go out without an
    /// `Authorization` header.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, username: impl Into<String>, role: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.role = Some(role.into());
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Capability check used in place of route gating: the session must be
    /// authenticated and its role must be one of `allowed`.
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        match (&self.access_token, self.role.as_deref()) {
            (Some(_), Some(role)) => allowed.contains(&role),
            _ => false,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}
