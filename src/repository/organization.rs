//! Repository implementation for organizations.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::filter::TrashedFilter;
use crate::domain::organization::{NewOrganization, Organization, UpdateOrganization};
use crate::domain::types::{AccountId, OrganizationId};
use crate::models::organization::{
    NewOrganization as DbNewOrganization, Organization as DbOrganization,
    UpdateOrganization as DbUpdateOrganization,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ListQuery, OrganizationReader, OrganizationWriter, count_to_usize,
    like_pattern,
};

fn into_domain(rows: Vec<DbOrganization>) -> RepositoryResult<Vec<Organization>> {
    rows.into_iter()
        .map(|row| Organization::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl OrganizationReader for DieselRepository {
    fn get_organization_by_id(
        &self,
        id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Option<Organization>> {
        use crate::schema::organizations;

        let mut conn = self.conn()?;

        let organization = organizations::table
            .filter(organizations::id.eq(id.get()))
            .filter(organizations::account_id.eq(account_id.get()))
            .first::<DbOrganization>(&mut conn)
            .optional()?;

        organization
            .map(|row| Organization::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_organizations(
        &self,
        query: ListQuery,
    ) -> RepositoryResult<(usize, Vec<Organization>)> {
        use crate::schema::organizations;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = organizations::table
                .filter(organizations::account_id.eq(query.account_id.get()))
                .into_boxed::<Sqlite>();

            items = match query.trashed {
                TrashedFilter::Active => items.filter(organizations::deleted_at.is_null()),
                TrashedFilter::TrashedOnly => items.filter(organizations::deleted_at.is_not_null()),
                TrashedFilter::All => items,
            };

            if let Some(term) = &query.search {
                items = items.filter(organizations::name.like(like_pattern(term)));
            }

            items
        };

        let total = count_to_usize(query_builder().count().get_result::<i64>(&mut conn)?)?;

        let mut items = query_builder().order((organizations::name.asc(), organizations::id.asc()));

        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let rows = items.load::<DbOrganization>(&mut conn)?;

        Ok((total, into_domain(rows)?))
    }

    fn list_account_organizations(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Organization>> {
        use crate::schema::organizations;

        let mut conn = self.conn()?;

        let rows = organizations::table
            .filter(organizations::account_id.eq(account_id.get()))
            .filter(organizations::deleted_at.is_null())
            .order((organizations::name.asc(), organizations::id.asc()))
            .load::<DbOrganization>(&mut conn)?;

        into_domain(rows)
    }
}

impl DieselRepository {
    fn set_organization_deleted_at(
        &self,
        id: OrganizationId,
        account_id: AccountId,
        deleted_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Organization> {
        use crate::schema::organizations;

        let mut conn = self.conn()?;

        let row = diesel::update(
            organizations::table
                .filter(organizations::id.eq(id.get()))
                .filter(organizations::account_id.eq(account_id.get())),
        )
        .set((
            organizations::deleted_at.eq(deleted_at),
            organizations::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbOrganization>(&mut conn)?;

        Organization::try_from(row).map_err(RepositoryError::from)
    }
}

impl OrganizationWriter for DieselRepository {
    fn create_organization(
        &self,
        new_organization: &NewOrganization,
    ) -> RepositoryResult<Organization> {
        use crate::schema::organizations;

        let mut conn = self.conn()?;

        let insertable = DbNewOrganization::from_domain(new_organization, Utc::now().naive_utc());

        let row = diesel::insert_into(organizations::table)
            .values(&insertable)
            .get_result::<DbOrganization>(&mut conn)?;

        Organization::try_from(row).map_err(RepositoryError::from)
    }

    fn update_organization(
        &self,
        id: OrganizationId,
        account_id: AccountId,
        updates: &UpdateOrganization,
    ) -> RepositoryResult<Organization> {
        use crate::schema::organizations;

        let mut conn = self.conn()?;

        let changeset = DbUpdateOrganization::from_domain(updates, Utc::now().naive_utc());

        let row = diesel::update(
            organizations::table
                .filter(organizations::id.eq(id.get()))
                .filter(organizations::account_id.eq(account_id.get())),
        )
        .set(&changeset)
        .get_result::<DbOrganization>(&mut conn)?;

        Organization::try_from(row).map_err(RepositoryError::from)
    }

    fn trash_organization(
        &self,
        id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Organization> {
        self.set_organization_deleted_at(id, account_id, Some(Utc::now().naive_utc()))
    }

    fn restore_organization(
        &self,
        id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Organization> {
        self.set_organization_deleted_at(id, account_id, None)
    }
}
