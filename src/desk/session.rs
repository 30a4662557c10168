use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::storage::{LocalStorage, StorageError, TOKEN_KEY, USER_KEY};
use crate::types::AuthResponse;

pub const GUEST_USERNAME: &str = "Guest";

/// The `user` value kept in local storage. Guests carry only a name and
/// the `guest` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub guest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionUser {
    pub fn guest() -> Self {
        Self {
            username: GUEST_USERNAME.to_string(),
            guest: true,
            id: None,
            email: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Authenticated { token: String, user: SessionUser },
    Guest { user: SessionUser },
    Anonymous,
}

impl Session {
    /// Restore the session from storage. A token wins over a guest marker.
    pub fn load(storage: &LocalStorage) -> Result<Self, StorageError> {
        let user: Option<SessionUser> = storage.get_json(USER_KEY)?;
        let token = storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty());

        Ok(match (token, user) {
            (Some(token), Some(user)) => Session::Authenticated {
                token: token.to_string(),
                user,
            },
            (Some(token), None) => Session::Authenticated {
                token: token.to_string(),
                user: SessionUser {
                    username: String::new(),
                    guest: false,
                    id: None,
                    email: None,
                },
            },
            (None, Some(user)) if user.guest => Session::Guest { user },
            _ => Session::Anonymous,
        })
    }

    pub fn start_guest(storage: &mut LocalStorage) -> Result<Self, StorageError> {
        let user = SessionUser::guest();
        storage.remove_item(TOKEN_KEY)?;
        storage.set_json(USER_KEY, &user)?;
        tracing::debug!("Started guest session");
        Ok(Session::Guest { user })
    }

    pub fn sign_in(storage: &mut LocalStorage, auth: AuthResponse) -> Result<Self, StorageError> {
        let user = SessionUser {
            username: auth.user.username,
            guest: false,
            id: Some(auth.user.id),
            email: Some(auth.user.email),
        };
        storage.set_item(TOKEN_KEY, auth.token.clone())?;
        storage.set_json(USER_KEY, &user)?;
        Ok(Session::Authenticated {
            token: auth.token,
            user,
        })
    }

    /// Forget token and user. Guest items stay where they are.
    pub fn sign_out(storage: &mut LocalStorage) -> Result<Self, StorageError> {
        storage.remove_item(TOKEN_KEY)?;
        storage.remove_item(USER_KEY)?;
        Ok(Session::Anonymous)
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::Authenticated { user, .. } | Session::Guest { user } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Session::Guest { .. })
    }
}
