//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::account::{Account, NewAccount};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::organization::{NewOrganization, Organization, UpdateOrganization};
use crate::domain::types::{AccountId, ContactId, OrganizationId, UserEmail, UserId};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AccountReader, AccountWriter, ContactReader, ContactWriter, ListQuery, OrganizationReader,
    OrganizationWriter, UserListQuery, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl AccountReader for Repository {
        fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
    }

    impl AccountWriter for Repository {
        fn create_account(&self, new_account: &NewAccount) -> RepositoryResult<Account>;
    }

    impl OrganizationReader for Repository {
        fn get_organization_by_id(
            &self,
            id: OrganizationId,
            account_id: AccountId,
        ) -> RepositoryResult<Option<Organization>>;
        fn list_organizations(
            &self,
            query: ListQuery,
        ) -> RepositoryResult<(usize, Vec<Organization>)>;
        fn list_account_organizations(
            &self,
            account_id: AccountId,
        ) -> RepositoryResult<Vec<Organization>>;
    }

    impl OrganizationWriter for Repository {
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

    impl ContactReader for Repository {
        fn get_contact_by_id(
            &self,
            id: ContactId,
            account_id: AccountId,
        ) -> RepositoryResult<Option<Contact>>;
        fn list_contacts(
            &self,
            query: ListQuery,
        ) -> RepositoryResult<(usize, Vec<(Contact, Option<Organization>)>)>;
        fn list_organization_contacts(
            &self,
            organization_id: OrganizationId,
            account_id: AccountId,
        ) -> RepositoryResult<Vec<Contact>>;
    }

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn update_contact(
            &self,
            id: ContactId,
            account_id: AccountId,
            updates: &UpdateContact,
        ) -> RepositoryResult<Contact>;
        fn trash_contact(&self, id: ContactId, account_id: AccountId) -> RepositoryResult<Contact>;
        fn restore_contact(
            &self,
            id: ContactId,
            account_id: AccountId,
        ) -> RepositoryResult<Contact>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId, account_id: AccountId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
        fn get_active_user_with_account(
            &self,
            id: UserId,
        ) -> RepositoryResult<Option<(User, Account)>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
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
}
