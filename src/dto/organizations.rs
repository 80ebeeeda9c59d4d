//! DTOs for the organization pages.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::contact::Contact;
use crate::domain::organization::Organization;
use crate::dto::ListFilters;
use crate::pagination::Paginated;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrganizationRow {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl From<Organization> for OrganizationRow {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id.get(),
            name: organization.name.into_inner(),
            phone: organization.info.phone,
            city: organization.info.city,
            deleted_at: organization.deleted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrganizationIndexProps {
    pub filters: ListFilters,
    pub organizations: Paginated<OrganizationRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrganizationContactRow {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for OrganizationContactRow {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.get(),
            name: contact.name(),
            city: contact.info.city,
            phone: contact.info.phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrganizationDetail {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub deleted_at: Option<NaiveDateTime>,
    pub contacts: Vec<OrganizationContactRow>,
}

impl OrganizationDetail {
    pub fn new(organization: Organization, contacts: Vec<Contact>) -> Self {
        let info = organization.info;
        Self {
            id: organization.id.get(),
            name: organization.name.into_inner(),
            email: info.email,
            phone: info.phone,
            address: info.address,
            city: info.city,
            region: info.region,
            country: info.country,
            postal_code: info.postal_code,
            deleted_at: organization.deleted_at,
            contacts: contacts.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrganizationEditProps {
    pub organization: OrganizationDetail,
}
