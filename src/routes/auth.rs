use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, delete, get, post, routes};

use crate::forms::auth::LoginForm;
use crate::inertia::{Inertia, redirect};
use crate::middleware::LOGIN_PATH;
use crate::payload::Payload;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, auth as auth_service};

#[get("/login")]
pub async fn show_login(identity: Option<Identity>, inertia: Inertia) -> impl Responder {
    if identity.is_some() {
        return redirect("/");
    }
    inertia.render("Auth/Login", &())
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    inertia: Inertia,
    repo: actix_web::web::Data<DieselRepository>,
    Payload(form): Payload<LoginForm>,
) -> HttpResponse {
    match auth_service::authenticate(repo.get_ref(), &form) {
        Ok(user) => match Identity::login(&req.extensions(), user.id.to_string()) {
            Ok(_) => {
                log::info!("User {} logged in", user.id);
                redirect("/")
            }
            Err(err) => {
                log::error!("Failed to store the session identity: {err}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(ServiceError::Validation(errors)) => {
            inertia.with_errors(errors).render("Auth/Login", &())
        }
        Err(err) => error_response(err, "log in"),
    }
}

#[routes]
#[post("/logout")]
#[delete("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect(LOGIN_PATH)
}
