//! Repository implementation for contacts.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::filter::TrashedFilter;
use crate::domain::organization::Organization;
use crate::domain::types::{AccountId, ContactId, OrganizationId, TypeConstraintError};
use crate::models::contact::{
    Contact as DbContact, NewContact as DbNewContact, UpdateContact as DbUpdateContact,
};
use crate::models::organization::Organization as DbOrganization;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ContactReader, ContactWriter, DieselRepository, ListQuery, count_to_usize, like_pattern,
};

impl ContactReader for DieselRepository {
    fn get_contact_by_id(
        &self,
        id: ContactId,
        account_id: AccountId,
    ) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let contact = contacts::table
            .filter(contacts::id.eq(id.get()))
            .filter(contacts::account_id.eq(account_id.get()))
            .first::<DbContact>(&mut conn)
            .optional()?;

        contact
            .map(|row| Contact::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_contacts(
        &self,
        query: ListQuery,
    ) -> RepositoryResult<(usize, Vec<(Contact, Option<Organization>)>)> {
        use crate::schema::{contacts, organizations};

        let mut conn = self.conn()?;
        let account_id = query.account_id.get();

        let query_builder = || {
            let mut items = contacts::table
                .filter(contacts::account_id.eq(account_id))
                .into_boxed::<Sqlite>();

            items = match query.trashed {
                TrashedFilter::Active => items.filter(contacts::deleted_at.is_null()),
                TrashedFilter::TrashedOnly => items.filter(contacts::deleted_at.is_not_null()),
                TrashedFilter::All => items,
            };

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                let matching_organizations = organizations::table
                    .filter(organizations::account_id.eq(account_id))
                    .filter(organizations::name.like(pattern.clone()))
                    .select(organizations::id.nullable());

                items = items.filter(
                    contacts::first_name
                        .like(pattern.clone())
                        .or(contacts::last_name.like(pattern.clone()))
                        .or(contacts::email.like(pattern))
                        .or(contacts::organization_id.eq_any(matching_organizations)),
                );
            }

            items
        };

        let total = count_to_usize(query_builder().count().get_result::<i64>(&mut conn)?)?;

        let mut items = query_builder().order((
            contacts::last_name.asc(),
            contacts::first_name.asc(),
            contacts::id.asc(),
        ));

        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let db_contacts = items.load::<DbContact>(&mut conn)?;

        let organization_ids: Vec<i32> = db_contacts
            .iter()
            .filter_map(|contact| contact.organization_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let organization_map: HashMap<i32, DbOrganization> = organizations::table
            .filter(organizations::account_id.eq(account_id))
            .filter(organizations::id.eq_any(organization_ids))
            .load::<DbOrganization>(&mut conn)?
            .into_iter()
            .map(|organization| (organization.id, organization))
            .collect();

        let combined = db_contacts
            .into_iter()
            .map(|db_contact| -> Result<_, TypeConstraintError> {
                let organization = db_contact
                    .organization_id
                    .and_then(|id| organization_map.get(&id))
                    .cloned()
                    .map(Organization::try_from)
                    .transpose()?;
                let contact = Contact::try_from(db_contact)?;
                Ok((contact, organization))
            })
            .collect::<Result<Vec<_>, TypeConstraintError>>()
            .map_err(RepositoryError::from)?;

        Ok((total, combined))
    }

    fn list_organization_contacts(
        &self,
        organization_id: OrganizationId,
        account_id: AccountId,
    ) -> RepositoryResult<Vec<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        contacts::table
            .filter(contacts::account_id.eq(account_id.get()))
            .filter(contacts::organization_id.eq(organization_id.get()))
            .filter(contacts::deleted_at.is_null())
            .order((
                contacts::last_name.asc(),
                contacts::first_name.asc(),
                contacts::id.asc(),
            ))
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(|row| Contact::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl DieselRepository {
    fn set_contact_deleted_at(
        &self,
        id: ContactId,
        account_id: AccountId,
        deleted_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let row = diesel::update(
            contacts::table
                .filter(contacts::id.eq(id.get()))
                .filter(contacts::account_id.eq(account_id.get())),
        )
        .set((
            contacts::deleted_at.eq(deleted_at),
            contacts::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbContact>(&mut conn)?;

        Contact::try_from(row).map_err(RepositoryError::from)
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let insertable = DbNewContact::from_domain(new_contact, Utc::now().naive_utc());

        let row = diesel::insert_into(contacts::table)
            .values(&insertable)
            .get_result::<DbContact>(&mut conn)?;

        Contact::try_from(row).map_err(RepositoryError::from)
    }

    fn update_contact(
        &self,
        id: ContactId,
        account_id: AccountId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let changeset = DbUpdateContact::from_domain(updates, Utc::now().naive_utc());

        let row = diesel::update(
            contacts::table
                .filter(contacts::id.eq(id.get()))
                .filter(contacts::account_id.eq(account_id.get())),
        )
        .set(&changeset)
        .get_result::<DbContact>(&mut conn)?;

        Contact::try_from(row).map_err(RepositoryError::from)
    }

    fn trash_contact(&self, id: ContactId, account_id: AccountId) -> RepositoryResult<Contact> {
        self.set_contact_deleted_at(id, account_id, Some(Utc::now().naive_utc()))
    }

    fn restore_contact(&self, id: ContactId, account_id: AccountId) -> RepositoryResult<Contact> {
        self.set_contact_deleted_at(id, account_id, None)
    }
}
