use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::contact_info::ContactInfo;
use crate::domain::types::{AccountId, ContactId, OrganizationId, PersonName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub account_id: AccountId,
    pub organization_id: Option<OrganizationId>,
    pub first_name: PersonName,
    pub last_name: PersonName,
    #[serde(flatten)]
    pub info: ContactInfo,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Contact {
    /// Full display name, "First Last".
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct NewContact {
    pub account_id: AccountId,
    pub organization_id: Option<OrganizationId>,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub info: ContactInfo,
}

impl NewContact {
    #[must_use]
    pub fn new(
        account_id: AccountId,
        organization_id: Option<OrganizationId>,
        first_name: PersonName,
        last_name: PersonName,
        info: ContactInfo,
    ) -> Self {
        Self {
            account_id,
            organization_id,
            first_name,
            last_name,
            info,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateContact {
    pub organization_id: Option<OrganizationId>,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub info: ContactInfo,
}

impl UpdateContact {
    #[must_use]
    pub fn new(
        organization_id: Option<OrganizationId>,
        first_name: PersonName,
        last_name: PersonName,
        info: ContactInfo,
    ) -> Self {
        Self {
            organization_id,
            first_name,
            last_name,
            info,
        }
    }
}
