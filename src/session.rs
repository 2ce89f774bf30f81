//! Session state: who is signed in and what they may do.

use serde::{Deserialize, Serialize};

use crate::types::StoredUser;

/// Coarse role derived from the backend's free-form role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Anonymous,
    Client,
    Lawyer,
    Admin,
}

impl Role {
    /// Normalize a backend role string.
    ///
    /// Matching is case-insensitive and substring-based so `ROLE_ADMIN`,
    /// `SiteAdmin` and plain `admin` all land on the same variant. Admin
    /// wins over lawyer, which wins over client; the bare legacy value
    /// `user` also means client. Anything else is anonymous.
    pub fn from_raw(raw: Option<&str>) -> Role {
        let r = match raw {
            Some(s) => s.trim().to_lowercase(),
            None => return Role::Anonymous,
        };
        if r.contains("admin") {
            Role::Admin
        } else if r.contains("lawyer") {
            Role::Lawyer
        } else if r.contains("client") || r == "user" {
            Role::Client
        } else {
            Role::Anonymous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::Client => "client",
            Role::Lawyer => "lawyer",
            Role::Admin => "admin",
        }
    }
}

/// The persisted session: bearer token plus the user it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user: Option<StoredUser>,
}

impl Session {
    /// Role of the signed-in user. A session with a token but no user
    /// record still counts as anonymous; some backend builds return a
    /// token without the user payload.
    pub fn role(&self) -> Role {
        Role::from_raw(self.user.as_ref().and_then(|u| u.role.as_deref()))
    }
}
