//! Use cases behind the HTTP handlers.
//!
//! Every function is generic over the repository traits it needs so that it
//! can be exercised against [`crate::repository::mock::MockRepository`].

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FieldErrors;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod contacts;
pub mod organizations;
pub mod password;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Field-level problems to show next to the inputs.
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Password(#[from] password::PasswordError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Builds a [`ServiceError::Validation`] carrying a single field error.
pub(crate) fn field_error(field: &str, message: &str) -> ServiceError {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.to_string());
    ServiceError::Validation(errors)
}

/// Parses a path identifier; an invalid id cannot exist, so it is reported as not found.
pub(crate) fn resolve_id<T>(raw: i32) -> ServiceResult<T>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    T::try_from(raw).map_err(|_| ServiceError::NotFound)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use crate::domain::account::Account;
    use crate::domain::auth::AuthenticatedUser;
    use crate::domain::types::{AccountId, AccountName, PersonName, UserEmail, UserId};
    use crate::domain::user::User;

    pub fn user(id: i32, email: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: UserId::new(id).expect("valid id"),
            account_id: AccountId::new(1).expect("valid id"),
            email: UserEmail::new(email).expect("valid email"),
            first_name: PersonName::new("John").expect("valid name"),
            last_name: PersonName::new("Doe").expect("valid name"),
            password: String::new(),
            owner: true,
            photo_filename: None,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn account() -> Account {
        let now = Utc::now().naive_utc();
        Account {
            id: AccountId::new(1).expect("valid id"),
            name: AccountName::new("Acme Corporation").expect("valid name"),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn authenticated_user() -> AuthenticatedUser {
        AuthenticatedUser::new(user(1, "johndoe@example.com"), account())
    }
}
