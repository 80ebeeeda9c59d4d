//! Diesel models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{AccountId, PersonName, TypeConstraintError, UserEmail, UserId};
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub account_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub owner: bool,
    pub photo_filename: Option<String>,
    /// JSON array of role names.
    pub roles: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub account_id: i32,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
    pub owner: bool,
    pub roles: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Data used when updating a [`User`] record. A `None` password keeps the stored hash.
pub struct UpdateUser<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub owner: bool,
    pub password: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let roles: Vec<String> = serde_json::from_str(&user.roles)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("roles: {e}")))?;

        Ok(Self {
            id: UserId::try_from(user.id)?,
            account_id: AccountId::try_from(user.account_id)?,
            email: UserEmail::new(user.email)?,
            first_name: PersonName::new(user.first_name)?,
            last_name: PersonName::new(user.last_name)?,
            password: user.password,
            owner: user.owner,
            photo_filename: user.photo_filename,
            roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
            deleted_at: user.deleted_at,
        })
    }
}

impl<'a> NewUser<'a> {
    pub fn from_domain(user: &'a DomainNewUser, now: NaiveDateTime) -> Self {
        Self {
            account_id: user.account_id.get(),
            email: user.email.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            password: user.password.as_str(),
            owner: user.owner,
            roles: serde_json::Value::from(user.roles.clone()).to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateUser<'a> {
    pub fn from_domain(user: &'a DomainUpdateUser, now: NaiveDateTime) -> Self {
        Self {
            email: user.email.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            owner: user.owner,
            password: user.password.as_deref(),
            updated_at: now,
        }
    }
}
