//! Persistence ports and their Diesel implementation.
//!
//! Every reader/writer method that touches organizations, contacts or users
//! takes the owning [`AccountId`] so that one tenant can never see or modify
//! another tenant's rows.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::account::{Account, NewAccount};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::filter::{TrashedFilter, UserRole};
use crate::domain::organization::{NewOrganization, Organization, UpdateOrganization};
use crate::domain::types::{AccountId, ContactId, OrganizationId, UserEmail, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod account;
pub mod contact;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod organization;
pub mod user;

/// Diesel backed repository shared by every handler through `web::Data`.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Converts a SQL `COUNT(*)` into a row total.
pub(crate) fn count_to_usize(count: i64) -> RepositoryResult<usize> {
    usize::try_from(count)
        .map_err(|_| RepositoryError::Unexpected(format!("invalid row count: {count}")))
}

/// Wraps a search term in `%` for a substring `LIKE` match.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Returns `(limit, offset)` as SQL friendly integers, clamped to `i64::MAX`.
    pub fn limit_offset(&self) -> (i64, i64) {
        let (limit, offset) = crate::pagination::limit_and_offset(self.page, self.per_page);
        (
            i64::try_from(limit).unwrap_or(i64::MAX),
            i64::try_from(offset).unwrap_or(i64::MAX),
        )
    }
}

/// Filters shared by the organization and contact listings.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub account_id: AccountId,
    pub search: Option<String>,
    pub trashed: TrashedFilter,
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            search: None,
            trashed: TrashedFilter::default(),
            pagination: None,
        }
    }

    /// Sets the free-text search term. Blank terms leave the query unfiltered.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn trashed(mut self, trashed: TrashedFilter) -> Self {
        self.trashed = trashed;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Filters accepted by the user listing, which is never paginated.
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub account_id: AccountId,
    pub search: Option<String>,
    pub trashed: TrashedFilter,
    pub role: Option<UserRole>,
}

impl UserListQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            search: None,
            trashed: TrashedFilter::default(),
            role: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn trashed(mut self, trashed: TrashedFilter) -> Self {
        self.trashed = trashed;
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

pub trait AccountReader {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
}

pub trait AccountWriter {
    fn create_account(&self, new_account: &NewAccount) -> RepositoryResult<Account>;
}

pub trait OrganizationReader {
    fn get_organization_by_id(
        &self,
        id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Option<Organization>>;
    /// Returns the total matching rows and the requested window.
    fn list_organizations(&self, query: ListQuery)
    -> RepositoryResult<(usize, Vec<Organization>)>;
    /// Non-trashed organizations of the account ordered by name.
    fn list_account_organizations(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Organization>>;
}

pub trait OrganizationWriter {
    fn create_organization(
        &self,
        new_organization: &NewOrganization,
    ) -> RepositoryResult<Organization>;
    fn update_organization(
        &self,
        id: OrganizationId,
        account_id: AccountId,
        updates: &UpdateOrganization,
    ) -> RepositoryResult<Organization>;
    fn trash_organization(
        &self,
        id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Organization>;
    fn restore_organization(
        &self,
        id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Organization>;
}

pub trait ContactReader {
    fn get_contact_by_id(
        &self,
        id: ContactId,
        account_id: AccountId,
    ) -> RepositoryResult<Option<Contact>>;
    /// Returns the total matching rows and the requested window, each contact
    /// paired with its organization when it has one.
    fn list_contacts(
        &self,
        query: ListQuery,
    ) -> RepositoryResult<(usize, Vec<(Contact, Option<Organization>)>)>;
    /// Contacts of one organization ordered by last then first name.
    fn list_organization_contacts(
        &self,
        organization_id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Contact>>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn update_contact(
        &self,
        id: ContactId,
        account_id: AccountId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    fn trash_contact(&self, id: ContactId, account_id: AccountId) -> RepositoryResult<Contact>;
    fn restore_contact(&self, id: ContactId, account_id: AccountId)
    -> RepositoryResult<Contact>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId, account_id: AccountId) -> RepositoryResult<Option<User>>;
    /// Looks a user up by login email across all accounts, trashed included.
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    /// Loads a non-trashed user together with its account for the session.
    fn get_active_user_with_account(
        &self,
        id: UserId,
    ) -> RepositoryResult<Option<(User, Account)>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(
        &self,
        id: UserId,
        account_id: AccountId,
        updates: &UpdateUser,
    ) -> RepositoryResult<User>;
    fn trash_user(&self, id: UserId, account_id: AccountId) -> RepositoryResult<User>;
    fn restore_user(&self, id: UserId, account_id: AccountId) -> RepositoryResult<User>;
}
