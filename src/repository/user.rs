//! Repository implementation for users.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::account::Account;
use crate::domain::filter::TrashedFilter;
use crate::domain::types::{AccountId, UserEmail, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::models::account::Account as DbAccount;
use crate::models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserListQuery, UserReader, UserWriter, like_pattern};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId, account_id: AccountId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::id.eq(id.get()))
            .filter(users::account_id.eq(account_id.get()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(|row| User::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(|row| User::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_active_user_with_account(
        &self,
        id: UserId,
    ) -> RepositoryResult<Option<(User, Account)>> {
        use crate::schema::{accounts, users};

        let mut conn = self.conn()?;

        let row = users::table
            .inner_join(accounts::table)
            .filter(users::id.eq(id.get()))
            .filter(users::deleted_at.is_null())
            .select((DbUser::as_select(), DbAccount::as_select()))
            .first::<(DbUser, DbAccount)>(&mut conn)
            .optional()?;

        row.map(|(user, account)| -> RepositoryResult<(User, Account)> {
            Ok((
                User::try_from(user).map_err(RepositoryError::from)?,
                Account::try_from(account).map_err(RepositoryError::from)?,
            ))
        })
        .transpose()
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let mut items = users::table
            .filter(users::account_id.eq(query.account_id.get()))
            .into_boxed::<Sqlite>();

        items = match query.trashed {
            TrashedFilter::Active => items.filter(users::deleted_at.is_null()),
            TrashedFilter::TrashedOnly => items.filter(users::deleted_at.is_not_null()),
            TrashedFilter::All => items,
        };

        if let Some(role) = query.role {
            items = items.filter(users::owner.eq(role.is_owner()));
        }

        if let Some(term) = &query.search {
            let pattern = like_pattern(term);
            items = items.filter(
                users::first_name
                    .like(pattern.clone())
                    .or(users::last_name.like(pattern.clone()))
                    .or(users::email.like(pattern)),
            );
        }

        items
            .order((
                users::last_name.asc(),
                users::first_name.asc(),
                users::id.asc(),
            ))
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(|row| User::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl DieselRepository {
    fn set_user_deleted_at(
        &self,
        id: UserId,
        account_id: AccountId,
        deleted_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let row = diesel::update(
            users::table
                .filter(users::id.eq(id.get()))
                .filter(users::account_id.eq(account_id.get())),
        )
        .set((
            users::deleted_at.eq(deleted_at),
            users::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbUser>(&mut conn)?;

        User::try_from(row).map_err(RepositoryError::from)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let insertable = DbNewUser::from_domain(new_user, Utc::now().naive_utc());

        let row = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(row).map_err(RepositoryError::from)
    }

    fn update_user(
        &self,
        id: UserId,
        account_id: AccountId,
        updates: &UpdateUser,
    ) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let changeset = DbUpdateUser::from_domain(updates, Utc::now().naive_utc());

        let row = diesel::update(
            users::table
                .filter(users::id.eq(id.get()))
                .filter(users::account_id.eq(account_id.get())),
        )
        .set(&changeset)
        .get_result::<DbUser>(&mut conn)?;

        User::try_from(row).map_err(RepositoryError::from)
    }

    fn trash_user(&self, id: UserId, account_id: AccountId) -> RepositoryResult<User> {
        self.set_user_deleted_at(id, account_id, Some(Utc::now().naive_utc()))
    }

    fn restore_user(&self, id: UserId, account_id: AccountId) -> RepositoryResult<User> {
        self.set_user_deleted_at(id, account_id, None)
    }
}
