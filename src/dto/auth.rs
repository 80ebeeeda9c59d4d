use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountProps {
    pub id: i32,
    pub name: String,
}

/// The `auth.user` shared prop.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthUserProps {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub account: AccountProps,
    /// Always null; the pages do not consume roles yet.
    pub role: Option<String>,
}

impl From<&AuthenticatedUser> for AuthUserProps {
    fn from(auth: &AuthenticatedUser) -> Self {
        Self {
            id: auth.user.id.get(),
            email: auth.user.email.to_string(),
            first_name: auth.user.first_name.to_string(),
            last_name: auth.user.last_name.to_string(),
            account: AccountProps {
                id: auth.account.id.get(),
                name: auth.account.name.to_string(),
            },
            role: None,
        }
    }
}
