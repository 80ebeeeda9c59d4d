use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::IndexQuery;
use crate::forms::users::UserForm;
use crate::inertia::{Inertia, redirect};
use crate::payload::Payload;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, users as users_service};

#[get("/users")]
pub async fn index_users(
    query: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::load_index_page(repo.get_ref(), &user, query.into_inner()) {
        Ok(props) => inertia.with_user(&user).render("Users/Index", &props),
        Err(err) => error_response(err, "list users"),
    }
}

#[get("/users/create")]
pub async fn create_user_form(user: AuthenticatedUser, inertia: Inertia) -> impl Responder {
    inertia.with_user(&user).render("Users/Create", &())
}

#[post("/users")]
pub async fn store_user(
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
    Payload(form): Payload<UserForm>,
) -> impl Responder {
    match users_service::create_user(repo.get_ref(), &user, &form) {
        Ok(_) => {
            FlashMessage::success("User created.").send();
            redirect("/users")
        }
        Err(ServiceError::Validation(errors)) => inertia
            .with_user(&user)
            .with_errors(errors)
            .render("Users/Create", &()),
        Err(err) => error_response(err, "create user"),
    }
}

#[get("/users/{user_id}/edit")]
pub async fn edit_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::load_edit_page(repo.get_ref(), &user, user_id.into_inner())
    {
        Ok(props) => inertia.with_user(&user).render("Users/Edit", &props),
        Err(err) => error_response(err, "load user"),
    }
}

#[put("/users/{user_id}")]
pub async fn update_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    inertia: Inertia,
    repo: web::Data<DieselRepository>,
    Payload(form): Payload<UserForm>,
) -> impl Responder {
    let user_id = user_id.into_inner();

    match users_service::update_user(repo.get_ref(), &user, user_id, &form)
    {
        Ok(updated) => {
            FlashMessage::success("User updated.").send();
            redirect(&format!("/users/{}/edit", updated.id))
        }
        Err(ServiceError::Validation(errors)) => {
            match users_service::load_edit_page(repo.get_ref(), &user, user_id) {
                Ok(props) => inertia
                    .with_user(&user)
                    .with_errors(errors)
                    .render("Users/Edit", &props),
                Err(err) => error_response(err, "load user"),
            }
        }
        Err(err) => error_response(err, "update user"),
    }
}

#[delete("/users/{user_id}")]
pub async fn destroy_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match users_service::trash_user(repo.get_ref(), &user, user_id.into_inner())
    {
        Ok(updated) => {
            FlashMessage::success("User deleted.").send();
            redirect(&format!("/users/{}/edit", updated.id))
        }
        Err(err) => error_response(err, "delete user"),
    }
}

#[put("/users/{user_id}/restore")]
pub async fn restore_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match users_service::restore_user(
        repo.get_ref(),
        &user,
        user_id.into_inner(),
    ) {
        Ok(updated) => {
            FlashMessage::success("User restored.").send();
            redirect(&format!("/users/{}/edit", updated.id))
        }
        Err(err) => error_response(err, "restore user"),
    }
}
