use actix_web::{Responder, get};

use crate::domain::auth::AuthenticatedUser;
use crate::inertia::Inertia;

#[get("/")]
pub async fn show_dashboard(user: AuthenticatedUser, inertia: Inertia) -> impl Responder {
    inertia.with_user(&user).render("Dashboard/Index", &())
}

#[get("/reports")]
pub async fn show_reports(user: AuthenticatedUser, inertia: Inertia) -> impl Responder {
    inertia.with_user(&user).render("Reports/Index", &())
}
