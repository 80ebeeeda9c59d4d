use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, AccountName};

/// Tenant owning organizations, contacts and users.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewAccount {
    pub name: AccountName,
}

impl NewAccount {
    #[must_use]
    pub fn new(name: AccountName) -> Self {
        Self { name }
    }
}
