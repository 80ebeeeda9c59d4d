use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::contact_info::ContactInfo;
use crate::domain::types::{AccountId, OrganizationId, OrganizationName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: OrganizationId,
    pub account_id: AccountId,
    pub name: OrganizationName,
    #[serde(flatten)]
    pub info: ContactInfo,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Set when the organization has been moved to the trash.
    pub deleted_at: Option<NaiveDateTime>,
}

impl Organization {
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct NewOrganization {
    pub account_id: AccountId,
    pub name: OrganizationName,
    pub info: ContactInfo,
}

impl NewOrganization {
    #[must_use]
    pub fn new(account_id: AccountId, name: OrganizationName, info: ContactInfo) -> Self {
        Self {
            account_id,
            name,
            info,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateOrganization {
    pub name: OrganizationName,
    pub info: ContactInfo,
}

impl UpdateOrganization {
    #[must_use]
    pub fn new(name: OrganizationName, info: ContactInfo) -> Self {
        Self { name, info }
    }
}
