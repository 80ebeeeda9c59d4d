//! DTOs for the user pages.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::user::User;
use crate::dto::UserFilters;

/// Public URL prefix of uploaded images.
pub const IMAGES_PREFIX: &str = "/images";

/// Path of the `width`x`height` rendition of an image, e.g.
/// `/images/john.png` at 40x40 becomes `/images/john_40x40.png`.
///
/// Paths without an extension have no rendition.
pub fn resized_image_path(path: &str, width: u32, height: u32) -> Option<String> {
    let path = Path::new(path);
    let stem = path.file_stem()?.to_str()?;
    let extension = path.extension()?.to_str()?;
    let file_name = format!("{stem}_{width}x{height}.{extension}");

    Some(match path.parent().and_then(Path::to_str) {
        Some(dir) if !dir.is_empty() => format!("{dir}/{file_name}"),
        _ => file_name,
    })
}

fn photo(user: &User, size: u32) -> Option<String> {
    user.photo_filename
        .as_deref()
        .and_then(|file| resized_image_path(&format!("{IMAGES_PREFIX}/{file}"), size, size))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub owner: bool,
    pub photo: Option<String>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name(),
            photo: photo(&user, 40),
            email: user.email.into_inner(),
            owner: user.owner,
            deleted_at: user.deleted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserIndexProps {
    pub filters: UserFilters,
    pub users: Vec<UserRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub owner: bool,
    pub photo: Option<String>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl From<User> for UserDetail {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            photo: photo(&user, 60),
            first_name: user.first_name.into_inner(),
            last_name: user.last_name.into_inner(),
            email: user.email.into_inner(),
            owner: user.owner,
            deleted_at: user.deleted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserEditProps {
    pub user: UserDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resized_path_inserts_dimensions() {
        assert_eq!(
            resized_image_path("/images/john.png", 40, 40).as_deref(),
            Some("/images/john_40x40.png")
        );
        assert_eq!(
            resized_image_path("avatar.photo.jpg", 60, 60).as_deref(),
            Some("avatar.photo_60x60.jpg")
        );
    }

    #[test]
    fn path_without_extension_has_no_rendition() {
        assert_eq!(resized_image_path("/images/john", 40, 40), None);
    }
}
