//! Fills an empty, migrated database with a demo account.
//!
//! The data is deterministic so that every run produces the same rows.

use std::env;
use std::error::Error;

use config::Config;
use dotenvy::dotenv;

use ping_crm::db::establish_connection_pool;
use ping_crm::domain::account::NewAccount;
use ping_crm::domain::contact::NewContact;
use ping_crm::domain::contact_info::ContactInfo;
use ping_crm::domain::organization::NewOrganization;
use ping_crm::domain::types::{
    AccountId, AccountName, OrganizationId, OrganizationName, PersonName, UserEmail,
};
use ping_crm::domain::user::NewUser;
use ping_crm::models::config::ServerConfig;
use ping_crm::repository::{AccountWriter, ContactWriter, DieselRepository, OrganizationWriter, UserWriter};
use ping_crm::services::password::hash_password;

const FIRST_NAMES: [&str; 10] = [
    "Alice", "Brandon", "Chloe", "Dmitri", "Elena", "Farid", "Grace", "Hiro", "Isabel", "Jonas",
];
const LAST_NAMES: [&str; 10] = [
    "Anderson", "Baker", "Carter", "Dalton", "Evans", "Fischer", "Garcia", "Hughes", "Ivanova",
    "Jensen",
];
const COMPANY_WORDS: [&str; 10] = [
    "Apex", "Blue", "Cedar", "Delta", "Echo", "Falcon", "Granite", "Harbor", "Iron", "Juniper",
];
const COMPANY_SUFFIXES: [&str; 5] = ["Inc", "LLC", "Group", "Partners", "Holdings"];
const CITIES: [(&str, &str, &str); 5] = [
    ("Toronto", "Ontario", "CA"),
    ("Vancouver", "British Columbia", "CA"),
    ("Seattle", "Washington", "US"),
    ("Austin", "Texas", "US"),
    ("Denver", "Colorado", "US"),
];

const ORGANIZATION_COUNT: usize = 100;
const CONTACT_COUNT: usize = 100;
const USER_COUNT: usize = 5;
const DEFAULT_PASSWORD: &str = "secret";

fn info(index: usize, email: String) -> ContactInfo {
    let (city, region, country) = CITIES[index % CITIES.len()];
    ContactInfo {
        email: Some(email),
        phone: Some(format!("555-{:04}", 1000 + index)),
        address: Some(format!("{} Main Street", 10 + index)),
        city: Some(city.to_string()),
        region: Some(region.to_string()),
        country: Some(country.to_string()),
        postal_code: Some(format!("{:05}", 10000 + index * 7)),
    }
}

fn person(index: usize) -> (&'static str, &'static str) {
    (
        FIRST_NAMES[index % FIRST_NAMES.len()],
        LAST_NAMES[(index / FIRST_NAMES.len() + index) % LAST_NAMES.len()],
    )
}

fn seed(repo: &DieselRepository) -> Result<(), Box<dyn Error>> {
    let account = repo.create_account(&NewAccount::new(AccountName::new("Acme Corporation")?))?;
    let account_id: AccountId = account.id;

    let password = hash_password(DEFAULT_PASSWORD)?;

    repo.create_user(&NewUser::new(
        account_id,
        UserEmail::new("johndoe@example.com")?,
        PersonName::new("John")?,
        PersonName::new("Doe")?,
        password.clone(),
        true,
    ))?;

    for index in 0..USER_COUNT {
        let (first, last) = person(index * 3 + 1);
        repo.create_user(&NewUser::new(
            account_id,
            UserEmail::new(format!(
                "{}.{}{index}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            ))?,
            PersonName::new(first)?,
            PersonName::new(last)?,
            password.clone(),
            false,
        ))?;
    }

    let mut organization_ids: Vec<OrganizationId> = Vec::with_capacity(ORGANIZATION_COUNT);
    for index in 0..ORGANIZATION_COUNT {
        let word = COMPANY_WORDS[index % COMPANY_WORDS.len()];
        let suffix = COMPANY_SUFFIXES[(index / COMPANY_WORDS.len()) % COMPANY_SUFFIXES.len()];
        let name = format!("{word} {suffix} {}", index / 50 + 1);
        let email = format!("info{index}@{}.example.com", word.to_lowercase());

        let organization = repo.create_organization(&NewOrganization::new(
            account_id,
            OrganizationName::new(name)?,
            info(index, email),
        ))?;
        organization_ids.push(organization.id);
    }

    for index in 0..CONTACT_COUNT {
        let (first, last) = person(index);
        let organization_id = organization_ids
            .get((index * 37) % organization_ids.len().max(1))
            .copied();
        let email = format!(
            "{}.{}{index}@example.com",
            first.to_lowercase(),
            last.to_lowercase()
        );

        repo.create_contact(&NewContact::new(
            account_id,
            organization_id,
            PersonName::new(first)?,
            PersonName::new(last)?,
            info(index, email),
        ))?;
    }

    log::info!(
        "Seeded account {} with {} users, {ORGANIZATION_COUNT} organizations and {CONTACT_COUNT} contacts",
        account_id,
        USER_COUNT + 1
    );

    Ok(())
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .and_then(|settings| settings.try_deserialize::<ServerConfig>());

    let server_config = match settings {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(err) = seed(&DieselRepository::new(pool)) {
        log::error!("Failed to seed the database: {err}");
        std::process::exit(1);
    }
}
