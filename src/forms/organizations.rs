use serde::Deserialize;
use validator::Validate;

use crate::domain::contact_info::ContactInfo;
use crate::domain::organization::{NewOrganization, UpdateOrganization};
use crate::domain::types::{AccountId, OrganizationName, TypeConstraintError};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for creating or updating an organization.
pub struct OrganizationForm {
    #[validate(
        required(message = "This value should not be blank."),
        length(max = 100, message = "This value is too long. It should have 100 characters or less.")
    )]
    pub name: Option<String>,
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

impl OrganizationForm {
    fn name(&self) -> Result<OrganizationName, TypeConstraintError> {
        OrganizationName::new(self.name.clone().unwrap_or_default())
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

    /// Converts a validated form into a new organization of `account_id`.
    pub fn to_new_organization(
        &self,
        account_id: AccountId,
    ) -> Result<NewOrganization, TypeConstraintError> {
        Ok(NewOrganization::new(account_id, self.name()?, self.info()))
    }

    pub fn to_update_organization(&self) -> Result<UpdateOrganization, TypeConstraintError> {
        Ok(UpdateOrganization::new(self.name()?, self.info()))
    }
}
