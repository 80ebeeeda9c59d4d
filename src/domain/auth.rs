//! Request-scoped identity of the logged-in user.

use crate::domain::account::Account;
use crate::domain::user::User;

/// The logged-in user together with the tenant account every request is scoped to.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub account: Account,
}

impl AuthenticatedUser {
    pub fn new(user: User, account: Account) -> Self {
        Self { user, account }
    }
}
