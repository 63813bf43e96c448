//! Authentication state as the board sees it.
//!
//! Sign-in itself happens elsewhere; the board only needs the current user's
//! id to scope persistence calls. No user means anonymous, local-only mode.

use serde::{Deserialize, Serialize};

use canvas::consts::ANONYMOUS_OWNER;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), email: None }
    }
}

/// Snapshot of the authentication collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    /// True while the session is still being resolved.
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user), loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Id of the signed-in user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Owner recorded on new notes: the user id, or `"anonymous"`.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        self.user_id().unwrap_or(ANONYMOUS_OWNER)
    }
}
