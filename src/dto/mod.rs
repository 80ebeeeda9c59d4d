//! DTO modules shaping the props shipped to the client-side pages.

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod contacts;
pub mod organizations;
pub mod users;

/// Query string accepted by the listing pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexQuery {
    pub search: Option<String>,
    pub trashed: Option<String>,
    pub role: Option<String>,
}

impl IndexQuery {
    /// Trims every value and drops the blank ones.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            search: clean(self.search),
            trashed: clean(self.trashed),
            role: clean(self.role),
        }
    }
}

/// Echo of the active organization/contact filters.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ListFilters {
    pub search: Option<String>,
    pub trashed: Option<String>,
}

/// Echo of the active user filters.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UserFilters {
    pub search: Option<String>,
    pub role: Option<String>,
    pub trashed: Option<String>,
}
