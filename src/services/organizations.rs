//! Organization use cases.

use validator::Validate;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::filter::TrashedFilter;
use crate::domain::organization::Organization;
use crate::domain::types::OrganizationId;
use crate::dto::organizations::{OrganizationDetail, OrganizationEditProps, OrganizationIndexProps};
use crate::dto::{IndexQuery, ListFilters};
use crate::forms::field_errors;
use crate::forms::organizations::OrganizationForm;
use crate::pagination::{ITEMS_PER_PAGE, Paginated, normalize_page};
use crate::repository::{ContactReader, ListQuery, OrganizationReader, OrganizationWriter};
use crate::services::{ServiceError, ServiceResult, resolve_id};

/// Loads one page of the organization listing.
///
/// `page_url` builds the link of a page number for the pagination links.
pub fn load_index_page<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
    page: usize,
    page_url: F,
) -> ServiceResult<OrganizationIndexProps>
where
    R: OrganizationReader + ?Sized,
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

    let (total, organizations) = repo.list_organizations(list_query).map_err(|err| {
        log::error!("Failed to list organizations: {err}");
        err
    })?;

    let rows = organizations.into_iter().map(Into::into).collect();

    Ok(OrganizationIndexProps {
        filters: ListFilters {
            search: query.search,
            trashed: query.trashed,
        },
        organizations: Paginated::new(rows, total, page, page_url),
    })
}

/// Validates the form and stores a new organization for the user's account.
pub fn create_organization<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &OrganizationForm,
) -> ServiceResult<Organization>
where
    R: OrganizationWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(field_errors(&err)))?;

    let new_organization = form.to_new_organization(user.account.id)?;

    let organization = repo
        .create_organization(&new_organization)
        .map_err(|err| {
            log::error!("Failed to create organization: {err}");
            err
        })?;

    log::info!(
        "Organization {} created in account {}",
        organization.id,
        user.account.id
    );

    Ok(organization)
}

/// Loads the organization with its contacts for the edit page.
pub fn load_edit_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    organization_id: i32,
) -> ServiceResult<OrganizationEditProps>
where
    R: OrganizationReader + ContactReader + ?Sized,
{
    let organization_id: OrganizationId = resolve_id(organization_id)?;

    let organization = repo
        .get_organization_by_id(organization_id, user.account.id)?
        .ok_or(ServiceError::NotFound)?;

    let contacts = repo
        .list_organization_contacts(organization_id, user.account.id)
        .map_err(|err| {
            log::error!("Failed to list contacts of organization {organization_id}: {err}");
            err
        })?;

    Ok(OrganizationEditProps {
        organization: OrganizationDetail::new(organization, contacts),
    })
}

pub fn update_organization<R>(
    repo: &R,
    user: &AuthenticatedUser,
    organization_id: i32,
    form: &OrganizationForm,
) -> ServiceResult<Organization>
where
    R: OrganizationWriter + ?Sized,
{
    let organization_id: OrganizationId = resolve_id(organization_id)?;

    form.validate()
        .map_err(|err| ServiceError::Validation(field_errors(&err)))?;

    let updates = form.to_update_organization()?;

    repo.update_organization(organization_id, user.account.id, &updates)
        .map_err(ServiceError::from)
}

/// Soft deletes the organization.
pub fn trash_organization<R>(
    repo: &R,
    user: &AuthenticatedUser,
    organization_id: i32,
) -> ServiceResult<Organization>
where
    R: OrganizationWriter + ?Sized,
{
    let organization_id: OrganizationId = resolve_id(organization_id)?;

    repo.trash_organization(organization_id, user.account.id)
        .map_err(ServiceError::from)
}

pub fn restore_organization<R>(
    repo: &R,
    user: &AuthenticatedUser,
    organization_id: i32,
) -> ServiceResult<Organization>
where
    R: OrganizationWriter + ?Sized,
{
    let organization_id: OrganizationId = resolve_id(organization_id)?;

    repo.restore_organization(organization_id, user.account.id)
        .map_err(ServiceError::from)
}
