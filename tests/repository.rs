use ping_crm::domain::contact::{Contact, NewContact, UpdateContact};
use ping_crm::domain::contact_info::ContactInfo;
use ping_crm::domain::filter::{TrashedFilter, UserRole};
use ping_crm::domain::organization::{NewOrganization, Organization, UpdateOrganization};
use ping_crm::domain::types::{
    AccountId, OrganizationId, OrganizationName, PersonName, UserEmail, UserId,
};
use ping_crm::domain::user::{NewUser, UpdateUser, User};
use ping_crm::repository::errors::RepositoryError;
use ping_crm::repository::{
    AccountReader, ContactReader, ContactWriter, DieselRepository, ListQuery, OrganizationReader,
    OrganizationWriter, UserListQuery, UserReader, UserWriter,
};

mod common;

fn organization(repo: &DieselRepository, account_id: AccountId, name: &str) -> Organization {
    let info = ContactInfo {
        city: Some("Toronto".into()),
        phone: Some("555-0100".into()),
        ..ContactInfo::default()
    };
    repo.create_organization(&NewOrganization::new(
        account_id,
        OrganizationName::new(name).unwrap(),
        info,
    ))
    .unwrap()
}

fn contact(
    repo: &DieselRepository,
    account_id: AccountId,
    organization_id: Option<OrganizationId>,
    first: &str,
    last: &str,
    email: Option<&str>,
) -> Contact {
    let info = ContactInfo {
        email: email.map(str::to_string),
        ..ContactInfo::default()
    };
    repo.create_contact(&NewContact::new(
        account_id,
        organization_id,
        PersonName::new(first).unwrap(),
        PersonName::new(last).unwrap(),
        info,
    ))
    .unwrap()
}

fn user(
    repo: &DieselRepository,
    account_id: AccountId,
    email: &str,
    first: &str,
    last: &str,
    owner: bool,
) -> User {
    repo.create_user(&NewUser::new(
        account_id,
        UserEmail::new(email).unwrap(),
        PersonName::new(first).unwrap(),
        PersonName::new(last).unwrap(),
        "hash".into(),
        owner,
    ))
    .unwrap()
}

fn organization_names(items: &[Organization]) -> Vec<String> {
    items.iter().map(|o| o.name.to_string()).collect()
}

#[test]
fn test_account_repository_roundtrip() {
    let test_db = common::TestDb::new("test_account_repository_roundtrip.db");
    let repo = test_db.repository();

    let account = common::create_account(&repo, "Acme Corporation");
    let loaded = repo.get_account_by_id(account.id).unwrap().unwrap();
    assert_eq!(loaded.name.as_str(), "Acme Corporation");

    let missing = repo
        .get_account_by_id(AccountId::new(account.id.get() + 1).unwrap())
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_organization_search_is_case_insensitive_and_tenant_scoped() {
    let test_db = common::TestDb::new("test_organization_search.db");
    let repo = test_db.repository();

    let acme = common::create_account(&repo, "Acme");
    let other = common::create_account(&repo, "Other");

    organization(&repo, acme.id, "Bluebird Inc");
    organization(&repo, acme.id, "Redwood LLC");
    organization(&repo, other.id, "Bluebird Holdings");

    let (total, items) = repo
        .list_organizations(ListQuery::new(acme.id).search("BLUE"))
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(organization_names(&items), vec!["Bluebird Inc"]);
    assert!(items.iter().all(|o| o.account_id == acme.id));
}

#[test]
fn test_organizations_are_ordered_by_name() {
    let test_db = common::TestDb::new("test_organizations_are_ordered_by_name.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");

    for name in ["Delta", "Alpha", "Charlie", "Bravo"] {
        organization(&repo, acme.id, name);
    }

    let (_, items) = repo.list_organizations(ListQuery::new(acme.id)).unwrap();
    assert_eq!(
        organization_names(&items),
        vec!["Alpha", "Bravo", "Charlie", "Delta"]
    );
}

#[test]
fn test_organization_total_ignores_pagination() {
    let test_db = common::TestDb::new("test_organization_total_ignores_pagination.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");

    for index in 0..23 {
        organization(&repo, acme.id, &format!("Organization {index:02}"));
    }

    let (total, page_two) = repo
        .list_organizations(ListQuery::new(acme.id).paginate(2, 10))
        .unwrap();
    assert_eq!(total, 23);
    assert_eq!(page_two.len(), 10);
    assert_eq!(page_two[0].name.as_str(), "Organization 10");

    let (total, page_three) = repo
        .list_organizations(ListQuery::new(acme.id).paginate(3, 10))
        .unwrap();
    assert_eq!(total, 23);
    assert_eq!(page_three.len(), 3);

    let (total, beyond) = repo
        .list_organizations(ListQuery::new(acme.id).paginate(4, 10))
        .unwrap();
    assert_eq!(total, 23);
    assert!(beyond.is_empty());

    let (total, far_beyond) = repo
        .list_organizations(ListQuery::new(acme.id).paginate(usize::MAX, 10))
        .unwrap();
    assert_eq!(total, 23);
    assert!(far_beyond.is_empty());
}

#[test]
fn test_trashed_filter_and_restore() {
    let test_db = common::TestDb::new("test_trashed_filter_and_restore.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");

    let kept = organization(&repo, acme.id, "Kept");
    let trashed = organization(&repo, acme.id, "Trashed");

    let trashed = repo.trash_organization(trashed.id, acme.id).unwrap();
    assert!(trashed.is_trashed());

    let (total, active) = repo.list_organizations(ListQuery::new(acme.id)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(active[0].id, kept.id);

    let (total, only) = repo
        .list_organizations(ListQuery::new(acme.id).trashed(TrashedFilter::TrashedOnly))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(only[0].id, trashed.id);

    let (total, _) = repo
        .list_organizations(ListQuery::new(acme.id).trashed(TrashedFilter::All))
        .unwrap();
    assert_eq!(total, 2);

    let restored = repo.restore_organization(trashed.id, acme.id).unwrap();
    assert!(!restored.is_trashed());

    let (total, _) = repo.list_organizations(ListQuery::new(acme.id)).unwrap();
    assert_eq!(total, 2);
    let (total, _) = repo
        .list_organizations(ListQuery::new(acme.id).trashed(TrashedFilter::TrashedOnly))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_writes_are_tenant_scoped() {
    let test_db = common::TestDb::new("test_writes_are_tenant_scoped.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");
    let other = common::create_account(&repo, "Other");

    let foreign = organization(&repo, other.id, "Foreign");

    assert!(repo.get_organization_by_id(foreign.id, acme.id).unwrap().is_none());
    assert!(matches!(
        repo.trash_organization(foreign.id, acme.id),
        Err(RepositoryError::NotFound)
    ));

    let updates = UpdateOrganization::new(
        OrganizationName::new("Hijacked").unwrap(),
        ContactInfo::default(),
    );
    assert!(matches!(
        repo.update_organization(foreign.id, acme.id, &updates),
        Err(RepositoryError::NotFound)
    ));

    let untouched = repo.get_organization_by_id(foreign.id, other.id).unwrap().unwrap();
    assert_eq!(untouched.name.as_str(), "Foreign");
    assert!(!untouched.is_trashed());
}

#[test]
fn test_organization_update_clears_optional_fields() {
    let test_db = common::TestDb::new("test_organization_update_clears_optional_fields.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");

    let created = organization(&repo, acme.id, "Acme Widgets");
    assert_eq!(created.info.city.as_deref(), Some("Toronto"));

    let updates = UpdateOrganization::new(
        OrganizationName::new("Acme Gadgets").unwrap(),
        ContactInfo {
            phone: Some("555-0199".into()),
            ..ContactInfo::default()
        },
    );
    let updated = repo.update_organization(created.id, acme.id, &updates).unwrap();

    assert_eq!(updated.name.as_str(), "Acme Gadgets");
    assert_eq!(updated.info.phone.as_deref(), Some("555-0199"));
    assert_eq!(updated.info.city, None);
}

#[test]
fn test_contact_search_covers_names_email_and_organization() {
    let test_db = common::TestDb::new("test_contact_search.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");
    let other = common::create_account(&repo, "Other");

    let bluebird = organization(&repo, acme.id, "Bluebird Inc");

    contact(&repo, acme.id, Some(bluebird.id), "Ann", "Zimmer", None);
    contact(&repo, acme.id, None, "Bob", "Bluesky", None);
    contact(&repo, acme.id, None, "Carl", "Young", Some("carl@blue.example.com"));
    contact(&repo, acme.id, None, "Dana", "Xavier", Some("dana@example.com"));
    contact(&repo, other.id, None, "Eve", "Blue", None);

    let (total, items) = repo
        .list_contacts(ListQuery::new(acme.id).search("blue"))
        .unwrap();

    let names: Vec<String> = items.iter().map(|(c, _)| c.name()).collect();
    assert_eq!(total, 3);
    assert_eq!(names, vec!["Bob Bluesky", "Carl Young", "Ann Zimmer"]);

    let (_, with_organization) = &items[2];
    assert_eq!(
        with_organization.as_ref().map(|o| o.name.to_string()),
        Some("Bluebird Inc".to_string())
    );
    assert!(items[0].1.is_none());
}

#[test]
fn test_contacts_are_ordered_by_last_then_first_name() {
    let test_db = common::TestDb::new("test_contacts_ordering.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");

    contact(&repo, acme.id, None, "Zoe", "Adams", None);
    contact(&repo, acme.id, None, "Amy", "Brown", None);
    contact(&repo, acme.id, None, "Adam", "Adams", None);

    let (total, items) = repo.list_contacts(ListQuery::new(acme.id)).unwrap();
    let names: Vec<String> = items.iter().map(|(c, _)| c.name()).collect();

    assert_eq!(total, 3);
    assert_eq!(names, vec!["Adam Adams", "Zoe Adams", "Amy Brown"]);
}

#[test]
fn test_contact_update_trash_and_restore() {
    let test_db = common::TestDb::new("test_contact_update_trash_and_restore.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");
    let org = organization(&repo, acme.id, "Acme Widgets");

    let created = contact(&repo, acme.id, Some(org.id), "Ann", "Smith", None);

    let updates = UpdateContact::new(
        None,
        PersonName::new("Anne").unwrap(),
        PersonName::new("Smith").unwrap(),
        ContactInfo::default(),
    );
    let updated = repo.update_contact(created.id, acme.id, &updates).unwrap();
    assert_eq!(updated.name(), "Anne Smith");
    assert_eq!(updated.organization_id, None);

    repo.trash_contact(created.id, acme.id).unwrap();
    let (total, _) = repo.list_contacts(ListQuery::new(acme.id)).unwrap();
    assert_eq!(total, 0);

    repo.restore_contact(created.id, acme.id).unwrap();
    let (total, _) = repo.list_contacts(ListQuery::new(acme.id)).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_organization_contacts_listing() {
    let test_db = common::TestDb::new("test_organization_contacts_listing.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");
    let org = organization(&repo, acme.id, "Acme Widgets");

    contact(&repo, acme.id, Some(org.id), "Zed", "Brown", None);
    contact(&repo, acme.id, Some(org.id), "Amy", "Adams", None);
    contact(&repo, acme.id, None, "Solo", "Person", None);

    let contacts = repo.list_organization_contacts(org.id, acme.id).unwrap();
    let names: Vec<String> = contacts.iter().map(Contact::name).collect();
    assert_eq!(names, vec!["Amy Adams", "Zed Brown"]);
}

#[test]
fn test_user_listing_filters_by_role_search_and_trashed() {
    let test_db = common::TestDb::new("test_user_listing.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");
    let other = common::create_account(&repo, "Other");

    let owner = user(&repo, acme.id, "john@example.com", "John", "Doe", true);
    user(&repo, acme.id, "jane@example.com", "Jane", "Adams", false);
    let gone = user(&repo, acme.id, "old@example.com", "Old", "Timer", false);
    user(&repo, other.id, "john@other.example.com", "John", "Other", true);

    repo.trash_user(gone.id, acme.id).unwrap();

    let all = repo.list_users(UserListQuery::new(acme.id)).unwrap();
    let emails: Vec<&str> = all.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["jane@example.com", "john@example.com"]);

    let owners = repo
        .list_users(UserListQuery::new(acme.id).role(UserRole::Owner))
        .unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].id, owner.id);

    let found = repo
        .list_users(UserListQuery::new(acme.id).search("JOHN"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].account_id, acme.id);

    let trashed = repo
        .list_users(UserListQuery::new(acme.id).trashed(TrashedFilter::TrashedOnly))
        .unwrap();
    assert_eq!(trashed.len(), 1);
    assert_eq!(trashed[0].id, gone.id);
}

#[test]
fn test_user_lookup_and_update() {
    let test_db = common::TestDb::new("test_user_lookup_and_update.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");

    let created = user(&repo, acme.id, "john@example.com", "John", "Doe", true);

    let by_email = repo
        .get_user_by_email(&UserEmail::new("JOHN@example.com").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    let (session_user, account) = repo
        .get_active_user_with_account(created.id)
        .unwrap()
        .unwrap();
    assert_eq!(session_user.id, created.id);
    assert_eq!(account.id, acme.id);

    let updates = UpdateUser::new(
        UserEmail::new("johnny@example.com").unwrap(),
        PersonName::new("Johnny").unwrap(),
        PersonName::new("Doe").unwrap(),
        false,
        None,
    );
    let updated = repo.update_user(created.id, acme.id, &updates).unwrap();
    assert_eq!(updated.email.as_str(), "johnny@example.com");
    assert_eq!(updated.password, "hash");
    assert!(!updated.owner);

    repo.trash_user(created.id, acme.id).unwrap();
    assert!(repo.get_active_user_with_account(created.id).unwrap().is_none());
    assert!(repo
        .get_active_user_with_account(UserId::new(created.id.get() + 100).unwrap())
        .unwrap()
        .is_none());
}

#[test]
fn test_duplicate_user_email_is_unique_violation() {
    let test_db = common::TestDb::new("test_duplicate_user_email.db");
    let repo = test_db.repository();
    let acme = common::create_account(&repo, "Acme");

    user(&repo, acme.id, "john@example.com", "John", "Doe", true);

    let err = repo
        .create_user(&NewUser::new(
            acme.id,
            UserEmail::new("john@example.com").unwrap(),
            PersonName::new("Other").unwrap(),
            PersonName::new("John").unwrap(),
            "hash".into(),
            false,
        ))
        .unwrap_err();

    assert!(err.is_unique_violation());
}
