use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
/// Credentials posted to the login endpoint.
pub struct LoginForm {
    pub email: Option<String>,
    /// Never trimmed.
    pub password: Option<String>,
}
