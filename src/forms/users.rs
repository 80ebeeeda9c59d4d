use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{AccountId, PersonName, TypeConstraintError, UserEmail};
use crate::domain::user::{NewUser, UpdateUser};
use crate::forms::{FieldErrors, NOT_BLANK, deserialize_flag, field_errors};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for creating or updating a user.
pub struct UserForm {
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
    #[validate(
        required(message = "This value should not be blank."),
        length(max = 50, message = "This value is too long. It should have 50 characters or less."),
        email(message = "This value is not a valid email address.")
    )]
    pub email: Option<String>,
    /// Plain text password, never trimmed. Required only on create.
    pub password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub owner: bool,
}

impl UserForm {
    /// Runs the declarative constraints plus the password requirement.
    pub fn validate_fields(&self, require_password: bool) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => field_errors(&err),
        };

        if require_password && self.password.as_deref().is_none_or(|p| p.trim().is_empty()) {
            errors.insert("password".to_string(), NOT_BLANK.to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// New password to hash, if one was supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.trim().is_empty())
    }

    pub fn email(&self) -> Result<UserEmail, TypeConstraintError> {
        UserEmail::new(self.email.clone().unwrap_or_default())
    }

    fn names(&self) -> Result<(PersonName, PersonName), TypeConstraintError> {
        Ok((
            PersonName::new(self.first_name.clone().unwrap_or_default())?,
            PersonName::new(self.last_name.clone().unwrap_or_default())?,
        ))
    }

    pub fn to_new_user(
        &self,
        account_id: AccountId,
        password_hash: String,
    ) -> Result<NewUser, TypeConstraintError> {
        let (first_name, last_name) = self.names()?;
        Ok(NewUser::new(
            account_id,
            self.email()?,
            first_name,
            last_name,
            password_hash,
            self.owner,
        ))
    }

    pub fn to_update_user(
        &self,
        password_hash: Option<String>,
    ) -> Result<UpdateUser, TypeConstraintError> {
        let (first_name, last_name) = self.names()?;
        Ok(UpdateUser::new(
            self.email()?,
            first_name,
            last_name,
            self.owner,
            password_hash,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserForm {
        UserForm {
            first_name: Some("Jane".to_string()),
            last_name: Some("Roe".to_string()),
            email: Some("jane@example.com".to_string()),
            password: None,
            owner: false,
        }
    }

    #[test]
    fn password_required_only_on_create() {
        let form = filled();
        let errors = form.validate_fields(true).unwrap_err();
        assert_eq!(errors.get("password").map(String::as_str), Some(NOT_BLANK));
        assert!(form.validate_fields(false).is_ok());
    }

    #[test]
    fn whitespace_password_counts_as_missing() {
        let form = UserForm {
            password: Some("   ".to_string()),
            ..filled()
        };
        assert!(form.validate_fields(true).is_err());
        assert_eq!(form.new_password(), None);

        let form = UserForm {
            password: Some(" secret ".to_string()),
            ..filled()
        };
        assert_eq!(form.new_password(), Some(" secret "));
    }

    #[test]
    fn invalid_email_is_reported() {
        let form = UserForm {
            email: Some("nope".to_string()),
            ..filled()
        };
        let errors = form.validate_fields(false).unwrap_err();
        assert_eq!(
            errors.get("email").map(String::as_str),
            Some("This value is not a valid email address.")
        );
    }
}
