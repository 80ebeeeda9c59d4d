//! Login and session resolution.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{UserEmail, UserId};
use crate::domain::user::User;
use crate::forms::INVALID_CREDENTIALS;
use crate::forms::auth::LoginForm;
use crate::repository::UserReader;
use crate::services::password::verify_password;
use crate::services::{ServiceError, ServiceResult, field_error};

fn invalid_credentials() -> ServiceError {
    field_error("email", INVALID_CREDENTIALS)
}

/// Checks the posted credentials. Unknown, trashed and mismatching users all
/// produce the same `email` field error.
pub fn authenticate<R>(repo: &R, form: &LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let Some(email) = form
        .email
        .as_deref()
        .and_then(|email| UserEmail::new(email).ok())
    else {
        return Err(invalid_credentials());
    };
    let password = form.password.as_deref().unwrap_or_default();

    let user = match repo.get_user_by_email(&email)? {
        Some(user) if !user.is_trashed() => user,
        _ => {
            log::info!("Rejected login for {email}");
            return Err(invalid_credentials());
        }
    };

    let valid = verify_password(password, &user.password).map_err(|err| {
        log::error!("Stored password hash of user {} is unusable: {err}", user.id);
        err
    })?;

    if !valid {
        log::info!("Rejected login for {email}");
        return Err(invalid_credentials());
    }

    Ok(user)
}

/// Resolves the session identity into the request context.
pub fn load_authenticated_user<R>(repo: &R, identity: &str) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + ?Sized,
{
    let user_id = identity
        .parse::<i32>()
        .ok()
        .and_then(|id| UserId::new(id).ok())
        .ok_or(ServiceError::Unauthorized)?;

    let (user, account) = repo
        .get_active_user_with_account(user_id)
        .map_err(|err| {
            log::error!("Failed to load session user {user_id}: {err}");
            err
        })?
        .ok_or(ServiceError::Unauthorized)?;

    Ok(AuthenticatedUser::new(user, account))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::password::hash_password;
    use crate::services::test_support::{account, user};

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn stored_user(trashed: bool) -> User {
        let mut stored = user(1, "johndoe@example.com");
        stored.password = hash_password("secret").expect("hashes");
        if trashed {
            stored.deleted_at = Some(Utc::now().naive_utc());
        }
        stored
    }

    #[test]
    fn valid_credentials_authenticate() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .withf(|email| email.as_str() == "johndoe@example.com")
            .returning(|_| Ok(Some(stored_user(false))));

        let user = authenticate(&repo, &login("JohnDoe@example.com", "secret"))
            .expect("authenticates");
        assert_eq!(user.id.get(), 1);
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user(false))));

        let Err(ServiceError::Validation(errors)) =
            authenticate(&repo, &login("johndoe@example.com", "nope"))
        else {
            panic!("expected invalid credentials");
        };
        assert_eq!(errors["email"], INVALID_CREDENTIALS);
    }

    #[test]
    fn trashed_user_cannot_log_in() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user(true))));

        assert!(matches!(
            authenticate(&repo, &login("johndoe@example.com", "secret")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn session_identity_resolves_user_and_account() {
        let mut repo = MockRepository::new();
        repo.expect_get_active_user_with_account()
            .withf(|id| id.get() == 1)
            .returning(|_| Ok(Some((user(1, "johndoe@example.com"), account()))));

        let auth = load_authenticated_user(&repo, "1").expect("resolves");
        assert_eq!(auth.account.name.as_str(), "Acme Corporation");

        assert!(matches!(
            load_authenticated_user(&repo, "garbage"),
            Err(ServiceError::Unauthorized)
        ));
    }
}
