use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, PersonName, UserEmail, UserId};

/// Role every user carries in addition to the stored ones.
pub const DEFAULT_ROLE: &str = "ROLE_USER";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub account_id: AccountId,
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password: String,
    pub owner: bool,
    pub photo_filename: Option<String>,
    pub roles: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl User {
    /// Full display name, "First Last".
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Stored roles plus [`DEFAULT_ROLE`], without duplicates.
    pub fn granted_roles(&self) -> Vec<String> {
        let mut roles = self.roles.clone();
        if !roles.iter().any(|role| role == DEFAULT_ROLE) {
            roles.push(DEFAULT_ROLE.to_string());
        }
        roles
    }
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub account_id: AccountId,
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: String,
    pub owner: bool,
    pub roles: Vec<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(
        account_id: AccountId,
        email: UserEmail,
        first_name: PersonName,
        last_name: PersonName,
        password: String,
        owner: bool,
    ) -> Self {
        Self {
            account_id,
            email,
            first_name,
            last_name,
            password,
            owner,
            roles: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateUser {
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub owner: bool,
    /// New password hash; `None` keeps the current one.
    pub password: Option<String>,
}

impl UpdateUser {
    #[must_use]
    pub fn new(
        email: UserEmail,
        first_name: PersonName,
        last_name: PersonName,
        owner: bool,
        password: Option<String>,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            owner,
            password,
        }
    }
}
