//! User management use cases.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::filter::{TrashedFilter, UserRole};
use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::dto::users::{UserEditProps, UserIndexProps};
use crate::dto::{IndexQuery, UserFilters};
use crate::forms::users::UserForm;
use crate::forms::{ALREADY_USED, FieldErrors};
use crate::repository::errors::RepositoryError;
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::password::hash_password;
use crate::services::{ServiceError, ServiceResult, field_error, resolve_id};

pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<UserIndexProps>
where
    R: UserReader + ?Sized,
{
    let query = query.normalized();

    let mut list_query = UserListQuery::new(user.account.id)
        .trashed(TrashedFilter::from_query(query.trashed.as_deref()));
    if let Some(term) = &query.search {
        list_query = list_query.search(term.as_str());
    }
    if let Some(role) = UserRole::from_query(query.role.as_deref()) {
        list_query = list_query.role(role);
    }

    let users = repo.list_users(list_query).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    Ok(UserIndexProps {
        filters: UserFilters {
            search: query.search,
            role: query.role,
            trashed: query.trashed,
        },
        users: users.into_iter().map(Into::into).collect(),
    })
}

/// Validates the form, including login uniqueness against every other user.
fn validate_form<R>(
    repo: &R,
    form: &UserForm,
    current: Option<UserId>,
    require_password: bool,
) -> ServiceResult<()>
where
    R: UserReader + ?Sized,
{
    let mut errors = match form.validate_fields(require_password) {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors,
    };

    if !errors.contains_key("email")
        && let Ok(email) = form.email()
        && let Some(existing) = repo.get_user_by_email(&email)?
        && Some(existing.id) != current
    {
        errors.insert("email".to_string(), ALREADY_USED.to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

fn map_write_error(err: RepositoryError) -> ServiceError {
    if err.is_unique_violation() {
        return field_error("email", ALREADY_USED);
    }
    log::error!("Failed to save user: {err}");
    ServiceError::from(err)
}

pub fn create_user<R>(repo: &R, user: &AuthenticatedUser, form: &UserForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    validate_form(repo, form, None, true)?;

    let password_hash = hash_password(form.new_password().unwrap_or_default())?;
    let new_user = form.to_new_user(user.account.id, password_hash)?;

    let created = repo.create_user(&new_user).map_err(map_write_error)?;

    log::info!("User {} created in account {}", created.id, user.account.id);

    Ok(created)
}

pub fn load_edit_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
) -> ServiceResult<UserEditProps>
where
    R: UserReader + ?Sized,
{
    let user_id: UserId = resolve_id(user_id)?;

    let found = repo
        .get_user_by_id(user_id, user.account.id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(UserEditProps { user: found.into() })
}

/// Updates the user; a blank password keeps the stored hash.
pub fn update_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    form: &UserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let user_id: UserId = resolve_id(user_id)?;

    validate_form(repo, form, Some(user_id), false)?;

    let password_hash = form.new_password().map(hash_password).transpose()?;
    let updates = form.to_update_user(password_hash)?;

    repo.update_user(user_id, user.account.id, &updates)
        .map_err(map_write_error)
}

pub fn trash_user<R>(repo: &R, user: &AuthenticatedUser, user_id: i32) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let user_id: UserId = resolve_id(user_id)?;

    repo.trash_user(user_id, user.account.id)
        .map_err(ServiceError::from)
}

pub fn restore_user<R>(repo: &R, user: &AuthenticatedUser, user_id: i32) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let user_id: UserId = resolve_id(user_id)?;

    repo.restore_user(user_id, user.account.id)
        .map_err(ServiceError::from)
}
