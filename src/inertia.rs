//! Server side of the Inertia page protocol.
//!
//! A page is a `{component, props, url, version}` object. Requests carrying
//! `X-Inertia: true` receive it as JSON; full page loads receive the HTML shell
//! with the object embedded in the `data-page` attribute.

use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, InternalError};
use actix_web::http::{Method, StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::auth::AuthUserProps;
use crate::forms::FieldErrors;
use crate::models::config::ServerConfig;

pub const X_INERTIA: &str = "X-Inertia";
pub const X_INERTIA_VERSION: &str = "X-Inertia-Version";
pub const X_INERTIA_LOCATION: &str = "X-Inertia-Location";

/// Template wrapping every full page load.
pub const ROOT_TEMPLATE: &str = "app.html";

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FlashProps {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl FlashProps {
    /// Keeps the first message of each level.
    pub fn from_messages(messages: &IncomingFlashMessages) -> Self {
        let first = |level: Level| {
            messages
                .iter()
                .find(|message| message.level() == level)
                .map(|message| message.content().to_string())
        };

        Self {
            success: first(Level::Success),
            error: first(Level::Error),
        }
    }
}

/// Props every page receives in addition to its own.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SharedProps {
    pub errors: FieldErrors,
    pub auth: AuthProps,
    pub flash: FlashProps,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthProps {
    pub user: Option<AuthUserProps>,
}

/// The page object of the protocol.
#[derive(Debug, Serialize)]
pub struct Page {
    pub component: String,
    pub props: Value,
    pub url: String,
    pub version: String,
}

/// Request side state needed to answer with a page.
///
/// Extracting it also enforces the asset version: a stale Inertia GET is
/// answered with `409 Conflict` and `X-Inertia-Location` so that the client
/// performs a full reload.
pub struct Inertia {
    is_inertia: bool,
    url: String,
    version: String,
    shared: SharedProps,
    tera: Option<web::Data<Tera>>,
}

impl Inertia {
    pub fn new(is_inertia: bool, url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            is_inertia,
            url: url.into(),
            version: version.into(),
            shared: SharedProps::default(),
            tera: None,
        }
    }

    /// Fills `auth.user`.
    pub fn with_user(mut self, user: &AuthenticatedUser) -> Self {
        self.shared.auth.user = Some(user.into());
        self
    }

    /// Fills the `errors` prop.
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.shared.errors = errors;
        self
    }

    /// Builds the page object merging the shared props with `props`.
    pub fn page<P: Serialize>(&self, component: &str, props: &P) -> Result<Page, serde_json::Error> {
        let mut merged = match serde_json::to_value(&self.shared)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        match serde_json::to_value(props)? {
            Value::Object(map) => merged.extend(map),
            Value::Null => {}
            other => {
                merged.insert("data".to_string(), other);
            }
        }

        Ok(Page {
            component: component.to_string(),
            props: Value::Object(merged),
            url: self.url.clone(),
            version: self.version.clone(),
        })
    }

    /// Renders `component` with `props` as JSON or as the HTML shell.
    pub fn render<P: Serialize>(&self, component: &str, props: &P) -> HttpResponse {
        let page = match self.page(component, props) {
            Ok(page) => page,
            Err(err) => {
                log::error!("Failed to serialize props of {component}: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        };

        if self.is_inertia {
            return HttpResponse::Ok()
                .insert_header((X_INERTIA, "true"))
                .insert_header((header::VARY, X_INERTIA))
                .json(page);
        }

        let Some(tera) = &self.tera else {
            log::error!("No template engine registered to render {component}");
            return HttpResponse::InternalServerError().finish();
        };

        let page_json = match serde_json::to_string(&page) {
            Ok(page_json) => page_json,
            Err(err) => {
                log::error!("Failed to serialize page {component}: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        };

        let mut context = Context::new();
        context.insert("page", &page_json);
        context.insert("component", component);

        match tera.render(ROOT_TEMPLATE, &context) {
            Ok(body) => HttpResponse::Ok()
                .insert_header((header::VARY, X_INERTIA))
                .content_type("text/html; charset=utf-8")
                .body(body),
            Err(err) => {
                log::error!("Failed to render template {ROOT_TEMPLATE}: {err}");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

impl FromRequest for Inertia {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let config = req
                .app_data::<web::Data<ServerConfig>>()
                .ok_or_else(|| ErrorInternalServerError("server configuration is not registered"))?;

            let is_inertia = header_value(&req, X_INERTIA) == Some("true");
            let url = match req.uri().path_and_query() {
                Some(path_and_query) => path_and_query.as_str().to_string(),
                None => req.path().to_string(),
            };

            if is_inertia
                && req.method() == Method::GET
                && header_value(&req, X_INERTIA_VERSION)
                    .is_some_and(|version| version != config.asset_version)
            {
                let response = HttpResponse::build(StatusCode::CONFLICT)
                    .insert_header((X_INERTIA_LOCATION, url.clone()))
                    .finish();
                return Err(InternalError::from_response("stale asset version", response).into());
            }

            let flash = IncomingFlashMessages::extract(&req).await?;

            let mut inertia = Inertia::new(is_inertia, url, config.asset_version.clone());
            inertia.shared.flash = FlashProps::from_messages(&flash);
            inertia.tera = req.app_data::<web::Data<Tera>>().cloned();

            Ok(inertia)
        })
    }
}

/// `303 See Other` to `location`, the redirect Inertia expects after
/// non-GET requests.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
