use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{NewContact, UpdateContact};
use crate::domain::contact_info::ContactInfo;
use crate::domain::types::{AccountId, OrganizationId, PersonName, TypeConstraintError};
use crate::forms::deserialize_optional_id;

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for creating or updating a contact.
pub struct ContactForm {
    #[validate(
        required(message = "This value should not be blank."),
        length(max = 25, message = "This value is too long. It should have 25 characters or less.")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "This value should not be blank."),
        length(max = 25, message = "This value is too long. It should have 25 characters or less.")
    )]
    pub last_name: Option<String>,
    /// Must reference an organization of the same account; checked by the service.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub organization_id: Option<i32>,
    #[validate(
        length(max = 50, message = "This value is too long. It should have 50 characters or less."),
        email(message = "This value is not a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "This value is too long. It should have 50 characters or less."))]
    pub phone: Option<String>,
    #[validate(length(max = 150, message = "This value is too long. It should have 150 characters or less."))]
    pub address: Option<String>,
    #[validate(length(max = 50, message = "This value is too long. It should have 50 characters or less."))]
    pub city: Option<String>,
    #[validate(length(max = 50, message = "This value is too long. It should have 50 characters or less."))]
    pub region: Option<String>,
    #[validate(length(max = 2, message = "This value is too long. It should have 2 characters or less."))]
    pub country: Option<String>,
    #[validate(length(max = 25, message = "This value is too long. It should have 25 characters or less."))]
    pub postal_code: Option<String>,
}

impl ContactForm {
    fn names(&self) -> Result<(PersonName, PersonName), TypeConstraintError> {
        Ok((
            PersonName::new(self.first_name.clone().unwrap_or_default())?,
            PersonName::new(self.last_name.clone().unwrap_or_default())?,
        ))
    }

    fn info(&self) -> ContactInfo {
        ContactInfo {
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            region: self.region.clone(),
            country: self.country.clone(),
            postal_code: self.postal_code.clone(),
        }
    }

    pub fn to_new_contact(
        &self,
        account_id: AccountId,
        organization_id: Option<OrganizationId>,
    ) -> Result<NewContact, TypeConstraintError> {
        let (first_name, last_name) = self.names()?;
        Ok(NewContact::new(
            account_id,
            organization_id,
            first_name,
            last_name,
            self.info(),
        ))
    }

    pub fn to_update_contact(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<UpdateContact, TypeConstraintError> {
        let (first_name, last_name) = self.names()?;
        Ok(UpdateContact::new(
            organization_id,
            first_name,
            last_name,
            self.info(),
        ))
    }
}
