//! API models for request and response payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
}

/// Validated fields for creating or replacing a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
}

/// Raw request body for create and update
///
/// Every field is optional at parse time so that a missing field is reported
/// by validation rather than as a JSON error. Keys are matched
/// case-insensitively by [`crate::extract::CaseInsensitiveJson`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl User {
    pub(crate) fn from_new(id: i64, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            name: new_user.name,
        }
    }

    pub(crate) fn replace_fields(&mut self, new_user: NewUser) {
        self.username = new_user.username;
        self.email = new_user.email;
        self.name = new_user.name;
    }
}
