//! Diesel models for contacts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact, UpdateContact as DomainUpdateContact,
};
use crate::domain::contact_info::ContactInfo;
use crate::domain::types::{
    AccountId, ContactId, OrganizationId, PersonName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
pub struct Contact {
    pub id: i32,
    pub account_id: i32,
    pub organization_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
/// Insertable form of [`Contact`].
pub struct NewContact<'a> {
    pub account_id: i32,
    pub organization_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub region: Option<&'a str>,
    pub country: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Contact`] record.
pub struct UpdateContact<'a> {
    pub organization_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub region: Option<&'a str>,
    pub country: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Contact> for DomainContact {
    type Error = TypeConstraintError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::try_from(contact.id)?,
            account_id: AccountId::try_from(contact.account_id)?,
            organization_id: contact
                .organization_id
                .map(OrganizationId::try_from)
                .transpose()?,
            first_name: PersonName::new(contact.first_name)?,
            last_name: PersonName::new(contact.last_name)?,
            info: ContactInfo {
                email: contact.email,
                phone: contact.phone,
                address: contact.address,
                city: contact.city,
                region: contact.region,
                country: contact.country,
                postal_code: contact.postal_code,
            },
            created_at: contact.created_at,
            updated_at: contact.updated_at,
            deleted_at: contact.deleted_at,
        })
    }
}

impl<'a> NewContact<'a> {
    pub fn from_domain(contact: &'a DomainNewContact, now: NaiveDateTime) -> Self {
        let info = &contact.info;
        Self {
            account_id: contact.account_id.get(),
            organization_id: contact.organization_id.map(OrganizationId::get),
            first_name: contact.first_name.as_str(),
            last_name: contact.last_name.as_str(),
            email: info.email.as_deref(),
            phone: info.phone.as_deref(),
            address: info.address.as_deref(),
            city: info.city.as_deref(),
            region: info.region.as_deref(),
            country: info.country.as_deref(),
            postal_code: info.postal_code.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateContact<'a> {
    pub fn from_domain(contact: &'a DomainUpdateContact, now: NaiveDateTime) -> Self {
        let info = &contact.info;
        Self {
            organization_id: contact.organization_id.map(OrganizationId::get),
            first_name: contact.first_name.as_str(),
            last_name: contact.last_name.as_str(),
            email: info.email.as_deref(),
            phone: info.phone.as_deref(),
            address: info.address.as_deref(),
            city: info.city.as_deref(),
            region: info.region.as_deref(),
            country: info.country.as_deref(),
            postal_code: info.postal_code.as_deref(),
            updated_at: now,
        }
    }
}
