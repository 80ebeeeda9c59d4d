use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, routes, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::IndexQuery;
use crate::forms::organizations::OrganizationForm;
use crate::inertia::{Inertia, redirect};
use crate::payload::Payload;
use crate::repository::DieselRepository;
use crate::routes::{error_response, page_url};
use crate::services::{ServiceError, organizations as organizations_service};

#[routes]
#[get("/organizations")]
#[get("/organizations/{page:\\d+}")]
pub async fn index_organizations(
    req: HttpRequest,
    page: Option<web::Path<usize>>,
    query: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let page = page.map(|page| page.into_inner()).unwrap_or(1);
    let query_string = req.query_string();

    match organizations_service::load_index_page(
        repo.get_ref(),
        &user,
        query.into_inner(),
        page,
        |page| page_url("organizations", page, query_string),
    ) {
        Ok(props) => inertia.with_user(&user).render("Organizations/Index", &props),
        Err(err) => error_response(err, "list organizations"),
    }
}

#[get("/organizations/create")]
pub async fn create_organization_form(user: AuthenticatedUser, inertia: Inertia) -> impl Responder {
    inertia.with_user(&user).render("Organizations/Create", &())
}

#[post("/organizations")]
pub async fn store_organization(
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
    Payload(form): Payload<OrganizationForm>,
) -> impl Responder {
    match organizations_service::create_organization(repo.get_ref(), &user, &form) {
        Ok(_) => {
            FlashMessage::success("Organization created.").send();
            redirect("/organizations")
        }
        Err(ServiceError::Validation(errors)) => inertia
            .with_user(&user)
            .with_errors(errors)
            .render("Organizations/Create", &()),
        Err(err) => error_response(err, "create organization"),
    }
}

#[get("/organizations/{organization_id}/edit")]
pub async fn edit_organization(
    organization_id: web::Path<i32>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match organizations_service::load_edit_page(repo.get_ref(), &user, organization_id.into_inner())
    {
        Ok(props) => inertia.with_user(&user).render("Organizations/Edit", &props),
        Err(err) => error_response(err, "load organization"),
    }
}

#[put("/organizations/{organization_id}")]
pub async fn update_organization(
    organization_id: web::Path<i32>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
    Payload(form): Payload<OrganizationForm>,
) -> impl Responder {
    let organization_id = organization_id.into_inner();

    match organizations_service::update_organization(repo.get_ref(), &user, organization_id, &form)
    {
        Ok(organization) => {
            FlashMessage::success("Organization updated.").send();
            redirect(&format!("/organizations/{}/edit", organization.id))
        }
        Err(ServiceError::Validation(errors)) => {
            match organizations_service::load_edit_page(repo.get_ref(), &user, organization_id) {
                Ok(props) => inertia
                    .with_user(&user)
                    .with_errors(errors)
                    .render("Organizations/Edit", &props),
                Err(err) => error_response(err, "load organization"),
            }
        }
        Err(err) => error_response(err, "update organization"),
    }
}

#[delete("/organizations/{organization_id}")]
pub async fn destroy_organization(
    organization_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match organizations_service::trash_organization(repo.get_ref(), &user, organization_id.into_inner())
    {
        Ok(organization) => {
            FlashMessage::success("Organization deleted.").send();
            redirect(&format!("/organizations/{}/edit", organization.id))
        }
        Err(err) => error_response(err, "delete organization"),
    }
}

#[put("/organizations/{organization_id}/restore")]
pub async fn restore_organization(
    organization_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match organizations_service::restore_organization(
        repo.get_ref(),
        &user,
        organization_id.into_inner(),
    ) {
        Ok(organization) => {
            FlashMessage::success("Organization restored.").send();
            redirect(&format!("/organizations/{}/edit", organization.id))
        }
        Err(err) => error_response(err, "restore organization"),
    }
}
