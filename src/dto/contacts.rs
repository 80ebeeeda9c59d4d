//! DTOs for the contact pages.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::contact::Contact;
use crate::domain::organization::Organization;
use crate::dto::ListFilters;
use crate::pagination::Paginated;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactOrganization {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactRow {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub deleted_at: Option<NaiveDateTime>,
    pub organization: Option<ContactOrganization>,
}

impl From<(Contact, Option<Organization>)> for ContactRow {
    fn from((contact, organization): (Contact, Option<Organization>)) -> Self {
        Self {
            id: contact.id.get(),
            name: contact.name(),
            phone: contact.info.phone,
            city: contact.info.city,
            deleted_at: contact.deleted_at,
            organization: organization.map(|organization| ContactOrganization {
                name: organization.name.into_inner(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactIndexProps {
    pub filters: ListFilters,
    pub contacts: Paginated<ContactRow>,
}

/// Entry of the organization picker on the contact forms.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrganizationOption {
    pub id: i32,
    pub name: String,
}

impl From<Organization> for OrganizationOption {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id.get(),
            name: organization.name.into_inner(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactCreateProps {
    pub organizations: Vec<OrganizationOption>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub organization_id: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl From<Contact> for ContactDetail {
    fn from(contact: Contact) -> Self {
        let info = contact.info;
        Self {
            id: contact.id.get(),
            first_name: contact.first_name.into_inner(),
            last_name: contact.last_name.into_inner(),
            organization_id: contact.organization_id.map(|id| id.get()),
            email: info.email,
            phone: info.phone,
            address: info.address,
            city: info.city,
            region: info.region,
            country: info.country,
            postal_code: info.postal_code,
            deleted_at: contact.deleted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactEditProps {
    pub contact: ContactDetail,
    pub organizations: Vec<OrganizationOption>,
}
