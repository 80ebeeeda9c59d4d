//! Contact use cases.

use validator::Validate;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::contact::Contact;
use crate::domain::filter::TrashedFilter;
use crate::domain::types::{ContactId, OrganizationId};
use crate::dto::contacts::{
    ContactCreateProps, ContactEditProps, ContactIndexProps, OrganizationOption,
};
use crate::dto::{IndexQuery, ListFilters};
use crate::forms::contacts::ContactForm;
use crate::forms::{FieldErrors, UNKNOWN_ORGANIZATION, field_errors};
use crate::pagination::{ITEMS_PER_PAGE, Paginated, normalize_page};
use crate::repository::{ContactReader, ContactWriter, ListQuery, OrganizationReader};
use crate::services::{ServiceError, ServiceResult, resolve_id};

pub fn load_index_page<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
    page: usize,
    page_url: F,
) -> ServiceResult<ContactIndexProps>
where
    R: ContactReader + ?Sized,
    F: Fn(usize) -> String,
{
    let query = query.normalized();
    let page = normalize_page(page);

    let mut list_query = ListQuery::new(user.account.id)
        .trashed(TrashedFilter::from_query(query.trashed.as_deref()))
        .paginate(page, ITEMS_PER_PAGE);
    if let Some(term) = &query.search {
        list_query = list_query.search(term.as_str());
    }

    let (total, contacts) = repo.list_contacts(list_query).map_err(|err| {
        log::error!("Failed to list contacts: {err}");
        err
    })?;

    let rows = contacts.into_iter().map(Into::into).collect();

    Ok(ContactIndexProps {
        filters: ListFilters {
            search: query.search,
            trashed: query.trashed,
        },
        contacts: Paginated::new(rows, total, page, page_url),
    })
}

/// Organizations offered by the contact forms.
pub fn load_organization_options<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<OrganizationOption>>
where
    R: OrganizationReader + ?Sized,
{
    let organizations = repo
        .list_account_organizations(user.account.id)
        .map_err(|err| {
            log::error!("Failed to list organizations: {err}");
            err
        })?;

    Ok(organizations.into_iter().map(Into::into).collect())
}

pub fn load_create_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ContactCreateProps>
where
    R: OrganizationReader + ?Sized,
{
    Ok(ContactCreateProps {
        organizations: load_organization_options(repo, user)?,
    })
}

/// Validates the form and resolves its organization inside the user's account.
///
/// Every violated field is reported at once, the organization check included.
fn validate_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &ContactForm,
) -> ServiceResult<Option<OrganizationId>>
where
    R: OrganizationReader + ?Sized,
{
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(err) => field_errors(&err),
    };

    let organization_id = match form.organization_id {
        None => None,
        Some(raw) => {
            let found = match OrganizationId::new(raw) {
                Ok(id) => repo
                    .get_organization_by_id(id, user.account.id)?
                    .map(|organization| organization.id),
                Err(_) => None,
            };
            if found.is_none() {
                errors.insert(
                    "organization_id".to_string(),
                    UNKNOWN_ORGANIZATION.to_string(),
                );
            }
            found
        }
    };

    if errors.is_empty() {
        Ok(organization_id)
    } else {
        Err(ServiceError::Validation(errors))
    }
}

pub fn create_contact<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &ContactForm,
) -> ServiceResult<Contact>
where
    R: OrganizationReader + ContactWriter + ?Sized,
{
    let organization_id = validate_form(repo, user, form)?;

    let new_contact = form.to_new_contact(user.account.id, organization_id)?;

    let contact = repo.create_contact(&new_contact).map_err(|err| {
        log::error!("Failed to create contact: {err}");
        err
    })?;

    log::info!("Contact {} created in account {}", contact.id, user.account.id);

    Ok(contact)
}

pub fn load_edit_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    contact_id: i32,
) -> ServiceResult<ContactEditProps>
where
    R: ContactReader + OrganizationReader + ?Sized,
{
    let contact_id: ContactId = resolve_id(contact_id)?;

    let contact = repo
        .get_contact_by_id(contact_id, user.account.id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(ContactEditProps {
        contact: contact.into(),
        organizations: load_organization_options(repo, user)?,
    })
}

pub fn update_contact<R>(
    repo: &R,
    user: &AuthenticatedUser,
    contact_id: i32,
    form: &ContactForm,
) -> ServiceResult<Contact>
where
    R: OrganizationReader + ContactWriter + ?Sized,
{
    let contact_id: ContactId = resolve_id(contact_id)?;

    let organization_id = validate_form(repo, user, form)?;

    let updates = form.to_update_contact(organization_id)?;

    repo.update_contact(contact_id, user.account.id, &updates)
        .map_err(ServiceError::from)
}

pub fn trash_contact<R>(repo: &R, user: &AuthenticatedUser, contact_id: i32) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    let contact_id: ContactId = resolve_id(contact_id)?;

    repo.trash_contact(contact_id, user.account.id)
        .map_err(ServiceError::from)
}

pub fn restore_contact<R>(
    repo: &R,
    user: &AuthenticatedUser,
    contact_id: i32,
) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    let contact_id: ContactId = resolve_id(contact_id)?;

    repo.restore_contact(contact_id, user.account.id)
        .map_err(ServiceError::from)
}
