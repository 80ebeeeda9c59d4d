//! Filter values shared by the organization, contact and user listings.

use serde::{Deserialize, Serialize};

/// Visibility of soft-deleted records in a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrashedFilter {
    /// Only records without a `deleted_at` timestamp.
    #[default]
    Active,
    /// Only soft-deleted records.
    TrashedOnly,
    /// Active and soft-deleted records together.
    All,
}

impl TrashedFilter {
    /// Query-string value selecting [`TrashedFilter::TrashedOnly`].
    pub const ONLY: &'static str = "only";
    /// Query-string value selecting [`TrashedFilter::All`].
    pub const WITH: &'static str = "with";

    /// Maps the optional `trashed` query value onto a filter.
    ///
    /// Unknown values fall back to [`TrashedFilter::Active`].
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(Self::ONLY) => TrashedFilter::TrashedOnly,
            Some(Self::WITH) => TrashedFilter::All,
            _ => TrashedFilter::Active,
        }
    }
}

/// Role filter accepted by the user listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Regular account member (`owner = false`).
    User,
    /// Account owner (`owner = true`).
    Owner,
}

impl UserRole {
    /// Maps the optional `role` query value onto a role, ignoring unknown values.
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        match value {
            Some("user") => Some(UserRole::User),
            Some("owner") => Some(UserRole::Owner),
            _ => None,
        }
    }

    /// Value of the `owner` column matching this role.
    pub const fn is_owner(self) -> bool {
        matches!(self, UserRole::Owner)
    }
}
