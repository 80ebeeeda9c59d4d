//! Diesel models for tenant accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::account::{Account as DomainAccount, NewAccount as DomainNewAccount};
use crate::domain::types::{AccountId, AccountName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::accounts)]
/// Diesel model for [`crate::domain::account::Account`].
pub struct Account {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::accounts)]
/// Insertable form of [`Account`].
pub struct NewAccount<'a> {
    pub name: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Account> for DomainAccount {
    type Error = TypeConstraintError;

    fn try_from(account: Account) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AccountId::try_from(account.id)?,
            name: AccountName::new(account.name)?,
            created_at: account.created_at,
            updated_at: account.updated_at,
        })
    }
}

impl<'a> NewAccount<'a> {
    /// Builds the insertable row stamping both timestamps with `now`.
    pub fn from_domain(account: &'a DomainNewAccount, now: NaiveDateTime) -> Self {
        Self {
            name: account.name.as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}
