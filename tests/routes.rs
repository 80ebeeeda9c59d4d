use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use serde_json::{Value, json};
use tera::Tera;

use ping_crm::configure_pages;
use ping_crm::domain::contact_info::ContactInfo;
use ping_crm::domain::organization::NewOrganization;
use ping_crm::domain::types::{AccountId, OrganizationName, PersonName, UserEmail};
use ping_crm::domain::user::NewUser;
use ping_crm::middleware::RedirectUnauthorized;
use ping_crm::models::config::ServerConfig;
use ping_crm::repository::{
    ContactReader, DieselRepository, ListQuery, OrganizationReader, OrganizationWriter,
    UserWriter,
};
use ping_crm::routes::auth::{login, logout, show_login};
use ping_crm::services::password::hash_password;

mod common;

const ASSET_VERSION: &str = "test-version";

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: ":memory:".into(),
        templates_dir: "templates/**/*".into(),
        secret: "x".repeat(64),
        asset_version: ASSET_VERSION.into(),
        public_dir: "public".into(),
    }
}

fn tera() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("app.html", r#"<div id="app" data-page="{{ page }}"></div>"#)
        .unwrap();
    tera
}

macro_rules! init_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    FlashMessagesFramework::builder(
                        CookieMessageStore::builder(Key::generate()).build(),
                    )
                    .build(),
                )
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(server_config()))
                .app_data(web::Data::new(tera()))
                .service(show_login)
                .service(login)
                .service(logout)
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .configure(configure_pages),
                ),
        )
        .await
    };
}

/// Logs `email` in and returns the cookies carrying the session.
macro_rules! sign_in {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"email": $email, "password": $password}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
        resp.response()
            .cookies()
            .map(|cookie| cookie.into_owned())
            .collect::<Vec<Cookie<'static>>>()
    }};
}

fn with_cookies(mut req: test::TestRequest, cookies: &[Cookie<'static>]) -> test::TestRequest {
    for cookie in cookies {
        req = req.cookie(cookie.clone());
    }
    req
}

fn inertia_get(uri: &str, cookies: &[Cookie<'static>]) -> test::TestRequest {
    with_cookies(
        test::TestRequest::get()
            .uri(uri)
            .insert_header(("X-Inertia", "true"))
            .insert_header(("X-Inertia-Version", ASSET_VERSION)),
        cookies,
    )
}

fn seed_owner(repo: &DieselRepository) -> AccountId {
    let account = common::create_account(repo, "Acme Corporation");
    repo.create_user(&NewUser::new(
        account.id,
        UserEmail::new("johndoe@example.com").unwrap(),
        PersonName::new("John").unwrap(),
        PersonName::new("Doe").unwrap(),
        hash_password("secret").unwrap(),
        true,
    ))
    .unwrap();
    account.id
}

fn seed_organizations(repo: &DieselRepository, account_id: AccountId, count: usize) {
    for index in 0..count {
        repo.create_organization(&NewOrganization::new(
            account_id,
            OrganizationName::new(format!("Organization {index:02}")).unwrap(),
            ContactInfo::default(),
        ))
        .unwrap();
    }
}

#[actix_web::test]
async fn anonymous_pages_redirect_to_login() {
    let test_db = common::TestDb::new("anonymous_pages_redirect_to_login.db");
    let app = init_app!(test_db.repository());

    let req = test::TestRequest::get().uri("/organizations").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn login_page_renders_html_shell() {
    let test_db = common::TestDb::new("login_page_renders_html_shell.db");
    let app = init_app!(test_db.repository());

    let req = test::TestRequest::get().uri("/login").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("data-page=\""));
    assert!(body.contains("&quot;component&quot;"));
    assert!(body.contains("Login"));
}

#[actix_web::test]
async fn stale_asset_version_is_a_conflict() {
    let test_db = common::TestDb::new("stale_asset_version_is_a_conflict.db");
    let app = init_app!(test_db.repository());

    let req = test::TestRequest::get()
        .uri("/login")
        .insert_header(("X-Inertia", "true"))
        .insert_header(("X-Inertia-Version", "outdated"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(resp.headers().get("X-Inertia-Location").unwrap(), "/login");
}

#[actix_web::test]
async fn wrong_password_reports_invalid_credentials() {
    let test_db = common::TestDb::new("wrong_password_reports_invalid_credentials.db");
    let repo = test_db.repository();
    seed_owner(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header(("X-Inertia", "true"))
        .set_json(json!({"email": "johndoe@example.com", "password": "nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["component"], "Auth/Login");
    assert_eq!(page["props"]["errors"]["email"], "Invalid credentials.");
}

#[actix_web::test]
async fn organization_index_returns_paginated_props() {
    let test_db = common::TestDb::new("organization_index_returns_paginated_props.db");
    let repo = test_db.repository();
    let account_id = seed_owner(&repo);
    seed_organizations(&repo, account_id, 23);
    let app = init_app!(repo);

    let cookies = sign_in!(app, "johndoe@example.com", "secret");

    let req = inertia_get("/organizations/2?search=organization", &cookies).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Inertia").unwrap(), "true");
    assert_eq!(resp.headers().get(header::VARY).unwrap(), "X-Inertia");

    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["component"], "Organizations/Index");
    assert_eq!(page["version"], ASSET_VERSION);
    assert_eq!(page["url"], "/organizations/2?search=organization");

    let props = &page["props"];
    assert_eq!(props["errors"], json!({}));
    assert_eq!(props["auth"]["user"]["email"], "johndoe@example.com");
    assert_eq!(props["auth"]["user"]["account"]["name"], "Acme Corporation");
    assert_eq!(props["filters"]["search"], "organization");
    assert_eq!(props["filters"]["trashed"], Value::Null);

    let data = props["organizations"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(data[0]["name"], "Organization 10");

    let links = props["organizations"]["links"].as_array().unwrap();
    assert_eq!(links.len(), 5);
    assert_eq!(links[0]["url"], "/organizations/1?search=organization");
    assert_eq!(links[2]["active"], true);
    assert_eq!(links[4]["url"], "/organizations/3?search=organization");
}

#[actix_web::test]
async fn storing_an_organization_trims_input_and_redirects() {
    let test_db = common::TestDb::new("storing_an_organization_trims_input.db");
    let repo = test_db.repository();
    let account_id = seed_owner(&repo);
    let app = init_app!(repo.clone());

    let cookies = sign_in!(app, "johndoe@example.com", "secret");

    let req = with_cookies(test::TestRequest::post().uri("/organizations"), &cookies)
        .set_json(json!({"name": "  Bluebird Inc  ", "city": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/organizations");

    let (total, items) = repo.list_organizations(ListQuery::new(account_id)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name.as_str(), "Bluebird Inc");
    assert_eq!(items[0].info.city, None);
}

#[actix_web::test]
async fn invalid_contact_is_rerendered_with_errors() {
    let test_db = common::TestDb::new("invalid_contact_is_rerendered_with_errors.db");
    let repo = test_db.repository();
    let account_id = seed_owner(&repo);
    let app = init_app!(repo.clone());

    let cookies = sign_in!(app, "johndoe@example.com", "secret");

    let req = with_cookies(test::TestRequest::post().uri("/contacts"), &cookies)
        .insert_header(("X-Inertia", "true"))
        .set_json(json!({"first_name": "  ", "email": "ann@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["component"], "Contacts/Create");

    let errors = page["props"]["errors"].as_object().unwrap();
    let mut fields: Vec<&str> = errors.keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["first_name", "last_name"]);
    assert_eq!(errors["first_name"], "This value should not be blank.");

    let (total, _) = repo.list_contacts(ListQuery::new(account_id)).unwrap();
    assert_eq!(total, 0);
}

#[actix_web::test]
async fn other_accounts_records_are_not_found() {
    let test_db = common::TestDb::new("other_accounts_records_are_not_found.db");
    let repo = test_db.repository();
    seed_owner(&repo);
    let other = common::create_account(&repo, "Other");
    seed_organizations(&repo, other.id, 1);
    let (_, foreign) = repo.list_organizations(ListQuery::new(other.id)).unwrap();
    let app = init_app!(repo);

    let cookies = sign_in!(app, "johndoe@example.com", "secret");

    let uri = format!("/organizations/{}/edit", foreign[0].id);
    let resp = test::call_service(&app, inertia_get(&uri, &cookies).to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn trash_and_restore_redirect_to_edit_page() {
    let test_db = common::TestDb::new("trash_and_restore_redirect_to_edit_page.db");
    let repo = test_db.repository();
    let account_id = seed_owner(&repo);
    seed_organizations(&repo, account_id, 1);
    let (_, items) = repo.list_organizations(ListQuery::new(account_id)).unwrap();
    let id = items[0].id;
    let app = init_app!(repo.clone());

    let cookies = sign_in!(app, "johndoe@example.com", "secret");
    let edit = format!("/organizations/{id}/edit");

    let req = with_cookies(
        test::TestRequest::delete().uri(&format!("/organizations/{id}")),
        &cookies,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), edit.as_str());
    assert!(
        repo.get_organization_by_id(id, account_id)
            .unwrap()
            .unwrap()
            .is_trashed()
    );

    let req = with_cookies(
        test::TestRequest::put().uri(&format!("/organizations/{id}/restore")),
        &cookies,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(
        !repo
            .get_organization_by_id(id, account_id)
            .unwrap()
            .unwrap()
            .is_trashed()
    );
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let test_db = common::TestDb::new("logout_clears_the_session.db");
    let repo = test_db.repository();
    seed_owner(&repo);
    let app = init_app!(repo);

    let cookies = sign_in!(app, "johndoe@example.com", "secret");

    let req = with_cookies(test::TestRequest::post().uri("/logout"), &cookies).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}
