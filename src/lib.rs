#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod inertia;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
pub mod pagination;
#[cfg(feature = "server")]
pub mod payload;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::auth::{login, logout, show_login};
#[cfg(feature = "server")]
use crate::routes::contacts::{
    create_contact_form, destroy_contact, edit_contact, index_contacts, restore_contact,
    store_contact, update_contact,
};
#[cfg(feature = "server")]
use crate::routes::main::{show_dashboard, show_reports};
#[cfg(feature = "server")]
use crate::routes::organizations::{
    create_organization_form, destroy_organization, edit_organization, index_organizations,
    restore_organization, store_organization, update_organization,
};
#[cfg(feature = "server")]
use crate::routes::users::{
    create_user_form, destroy_user, edit_user, index_users, restore_user, store_user, update_user,
};

/// Registers every authenticated page on `cfg`.
#[cfg(feature = "server")]
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.service(show_dashboard)
        .service(show_reports)
        .service(index_organizations)
        .service(create_organization_form)
        .service(store_organization)
        .service(edit_organization)
        .service(update_organization)
        .service(destroy_organization)
        .service(restore_organization)
        .service(index_contacts)
        .service(create_contact_form)
        .service(store_contact)
        .service(edit_contact)
        .service(update_contact)
        .service(destroy_contact)
        .service(restore_contact)
        .service(index_users)
        .service(create_user_form)
        .service(store_user)
        .service(edit_user)
        .service(update_user)
        .service(destroy_user)
        .service(restore_user);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    let public_dir = server_config.public_dir.clone();

    log::info!(
        "Listening on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", format!("{public_dir}/assets")))
            .service(Files::new("/images", format!("{public_dir}/images")))
            .service(show_login)
            .service(login)
            .service(logout)
            .service(
                web::scope("")
                    .wrap(middleware::RedirectUnauthorized)
                    .configure(configure_pages),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
