//! Diesel models for organizations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact_info::ContactInfo;
use crate::domain::organization::{
    NewOrganization as DomainNewOrganization, Organization as DomainOrganization,
    UpdateOrganization as DomainUpdateOrganization,
};
use crate::domain::types::{AccountId, OrganizationId, OrganizationName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::organizations)]
/// Diesel model for [`crate::domain::organization::Organization`].
pub struct Organization {
    pub id: i32,
    pub account_id: i32,
    pub name: String,
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
#[diesel(table_name = crate::schema::organizations)]
/// Insertable form of [`Organization`].
pub struct NewOrganization<'a> {
    pub account_id: i32,
    pub name: &'a str,
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
#[diesel(table_name = crate::schema::organizations)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating an [`Organization`] record.
pub struct UpdateOrganization<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub region: Option<&'a str>,
    pub country: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Organization> for DomainOrganization {
    type Error = TypeConstraintError;

    fn try_from(organization: Organization) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrganizationId::try_from(organization.id)?,
            account_id: AccountId::try_from(organization.account_id)?,
            name: OrganizationName::new(organization.name)?,
            info: ContactInfo {
                email: organization.email,
                phone: organization.phone,
                address: organization.address,
                city: organization.city,
                region: organization.region,
                country: organization.country,
                postal_code: organization.postal_code,
            },
            created_at: organization.created_at,
            updated_at: organization.updated_at,
            deleted_at: organization.deleted_at,
        })
    }
}

impl<'a> NewOrganization<'a> {
    pub fn from_domain(organization: &'a DomainNewOrganization, now: NaiveDateTime) -> Self {
        let info = &organization.info;
        Self {
            account_id: organization.account_id.get(),
            name: organization.name.as_str(),
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

impl<'a> UpdateOrganization<'a> {
    pub fn from_domain(organization: &'a DomainUpdateOrganization, now: NaiveDateTime) -> Self {
        let info = &organization.info;
        Self {
            name: organization.name.as_str(),
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

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn organization_into_domain() {
        let now = Utc::now().naive_utc();
        let row = Organization {
            id: 5,
            account_id: 1,
            name: "Blick Ltd".to_string(),
            email: None,
            phone: Some("555-0100".to_string()),
            address: None,
            city: Some("Springfield".to_string()),
            region: None,
            country: Some("US".to_string()),
            postal_code: None,
            created_at: now,
            updated_at: now,
            deleted_at: Some(now),
        };

        let domain = DomainOrganization::try_from(row).expect("valid organization row");
        assert_eq!(domain.id.get(), 5);
        assert_eq!(domain.name.as_str(), "Blick Ltd");
        assert_eq!(domain.info.city.as_deref(), Some("Springfield"));
        assert!(domain.is_trashed());
    }

    #[test]
    fn update_row_borrows_domain_values() {
        let now = Utc::now().naive_utc();
        let update = DomainUpdateOrganization::new(
            OrganizationName::new("Renamed").expect("valid name"),
            ContactInfo {
                phone: Some("123".to_string()),
                ..ContactInfo::default()
            },
        );

        let row = UpdateOrganization::from_domain(&update, now);
        assert_eq!(row.name, "Renamed");
        assert_eq!(row.phone, Some("123"));
        assert_eq!(row.email, None);
        assert_eq!(row.updated_at, now);
    }
}
