//! HTTP handlers and the helpers they share.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, auth as auth_service};

pub mod auth;
pub mod contacts;
pub mod main;
pub mod organizations;
pub mod users;

fn authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| ErrorUnauthorized("not logged in"))?;
    let id = identity
        .id()
        .map_err(|_| ErrorUnauthorized("session has no identity"))?;

    let repo = req
        .app_data::<web::Data<DieselRepository>>()
        .ok_or_else(|| ErrorInternalServerError("repository is not registered"))?;

    auth_service::load_authenticated_user(repo.get_ref(), &id).map_err(|err| match err {
        ServiceError::Unauthorized => ErrorUnauthorized("unknown session user"),
        err => {
            log::error!("Failed to resolve session user: {err}");
            ErrorInternalServerError("failed to resolve session user")
        }
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticated_user(req))
    }
}

/// URL of a listing page, keeping the current query string.
pub fn page_url(resource: &str, page: usize, query_string: &str) -> String {
    if query_string.is_empty() {
        format!("/{resource}/{page}")
    } else {
        format!("/{resource}/{page}?{query_string}")
    }
}

/// Maps the non-validation service failures onto a status code.
pub(crate) fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;
    use crate::repository::errors::RepositoryError;

    #[test]
    fn page_url_keeps_query_string() {
        assert_eq!(page_url("contacts", 2, ""), "/contacts/2");
        assert_eq!(
            page_url("contacts", 3, "search=acme&trashed=with"),
            "/contacts/3?search=acme&trashed=with"
        );
    }

    #[test]
    fn service_errors_map_to_status() {
        assert_eq!(
            error_response(ServiceError::NotFound, "load").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(ServiceError::Unauthorized, "load").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_response(
                ServiceError::Repository(RepositoryError::Unexpected("boom".to_string())),
                "load"
            )
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
