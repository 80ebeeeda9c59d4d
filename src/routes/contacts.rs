use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, routes, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::IndexQuery;
use crate::forms::contacts::ContactForm;
use crate::inertia::{Inertia, redirect};
use crate::payload::Payload;
use crate::repository::DieselRepository;
use crate::routes::{error_response, page_url};
use crate::services::{ServiceError, contacts as contacts_service};

#[routes]
#[get("/contacts")]
#[get("/contacts/{page:\\d+}")]
pub async fn index_contacts(
    req: HttpRequest,
    page: Option<web::Path<usize>>,
    query: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let page = page.map(|page| page.into_inner()).unwrap_or(1);
    let query_string = req.query_string();

    match contacts_service::load_index_page(
        repo.get_ref(),
        &user,
        query.into_inner(),
        page,
        |page| page_url("contacts", page, query_string),
    ) {
        Ok(props) => inertia.with_user(&user).render("Contacts/Index", &props),
        Err(err) => error_response(err, "list contacts"),
    }
}

#[get("/contacts/create")]
pub async fn create_contact_form(
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contacts_service::load_create_page(repo.get_ref(), &user) {
        Ok(props) => inertia.with_user(&user).render("Contacts/Create", &props),
        Err(err) => error_response(err, "load organizations"),
    }
}

#[post("/contacts")]
pub async fn store_contact(
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
    Payload(form): Payload<ContactForm>,
) -> impl Responder {
    match contacts_service::create_contact(repo.get_ref(), &user, &form) {
        Ok(_) => {
            FlashMessage::success("Contact created.").send();
            redirect("/contacts")
        }
        Err(ServiceError::Validation(errors)) => {
            match contacts_service::load_create_page(repo.get_ref(), &user) {
                Ok(props) => inertia
                    .with_user(&user)
                    .with_errors(errors)
                    .render("Contacts/Create", &props),
                Err(err) => error_response(err, "load organizations"),
            }
        }
        Err(err) => error_response(err, "create contact"),
    }
}

#[get("/contacts/{contact_id}/edit")]
pub async fn edit_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contacts_service::load_edit_page(repo.get_ref(), &user, contact_id.into_inner())
    {
        Ok(props) => inertia.with_user(&user).render("Contacts/Edit", &props),
        Err(err) => error_response(err, "load contact"),
    }
}

#[put("/contacts/{contact_id}")]
pub async fn update_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
    Payload(form): Payload<ContactForm>,
) -> impl Responder {
    let contact_id = contact_id.into_inner();

    match contacts_service::update_contact(repo.get_ref(), &user, contact_id, &form)
    {
        Ok(contact) => {
            FlashMessage::success("Contact updated.").send();
            redirect(&format!("/contacts/{}/edit", contact.id))
        }
        Err(ServiceError::Validation(errors)) => {
            match contacts_service::load_edit_page(repo.get_ref(), &user, contact_id) {
                Ok(props) => inertia
                    .with_user(&user)
                    .with_errors(errors)
                    .render("Contacts/Edit", &props),
                Err(err) => error_response(err, "load contact"),
            }
        }
        Err(err) => error_response(err, "update contact"),
    }
}

#[delete("/contacts/{contact_id}")]
pub async fn destroy_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match contacts_service::trash_contact(repo.get_ref(), &user, contact_id.into_inner())
    {
        Ok(contact) => {
            FlashMessage::success("Contact deleted.").send();
            redirect(&format!("/contacts/{}/edit", contact.id))
        }
        Err(err) => error_response(err, "delete contact"),
    }
}

#[put("/contacts/{contact_id}/restore")]
pub async fn restore_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match contacts_service::restore_contact(
        repo.get_ref(),
        &user,
        contact_id.into_inner(),
    ) {
        Ok(contact) => {
            FlashMessage::success("Contact restored.").send();
            redirect(&format!("/contacts/{}/edit", contact.id))
        }
        Err(err) => error_response(err, "restore contact"),
    }
}
