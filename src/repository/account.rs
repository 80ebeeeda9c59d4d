//! Repository implementation for tenant accounts.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::account::{Account, NewAccount};
use crate::domain::types::AccountId;
use crate::models::account::{Account as DbAccount, NewAccount as DbNewAccount};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AccountReader, AccountWriter, DieselRepository};

impl AccountReader for DieselRepository {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let account = accounts::table
            .find(id.get())
            .first::<DbAccount>(&mut conn)
            .optional()?;

        account
            .map(|account| Account::try_from(account).map_err(RepositoryError::from))
            .transpose()
    }
}

impl AccountWriter for DieselRepository {
    fn create_account(&self, new_account: &NewAccount) -> RepositoryResult<Account> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let insertable = DbNewAccount::from_domain(new_account, Utc::now().naive_utc());

        let account = diesel::insert_into(accounts::table)
            .values(&insertable)
            .get_result::<DbAccount>(&mut conn)?;

        Account::try_from(account).map_err(RepositoryError::from)
    }
}
