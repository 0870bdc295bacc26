//! Client-side input validation.
//!
//! These checks reject bad input before any network call, mirroring what the
//! backend enforces so the user gets immediate feedback. Limits match the
//! backend contract: password ≥ 8 chars, nickname 2–50 chars, at most 5
//! images per post, image files ≤ 5 MiB in the four supported formats.

use crate::errors::ApiError;

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_IMAGES_PER_POST: usize = 5;
pub const MIN_PASSWORD_LEN: usize = 8;

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Validate login input.
///
/// # Errors
///
/// `ApiError::Validation` when the email is blank or the password empty.
pub fn login_input(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        return Err(ApiError::Validation("email is required".into()));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".into()));
    }
    Ok(())
}

/// Validate registration input.
///
/// # Errors
///
/// `ApiError::Validation` describing the first failing rule.
pub fn register_input(email: &str, password: &str, nickname: &str) -> Result<(), ApiError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("a valid email address is required".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let nickname_len = nickname.trim().chars().count();
    if !(2..=50).contains(&nickname_len) {
        return Err(ApiError::Validation(
            "nickname must be between 2 and 50 characters".into(),
        ));
    }
    Ok(())
}

/// Validate post title/content and attachment count.
///
/// # Errors
///
/// `ApiError::Validation` when title or content is blank, or more than
/// [`MAX_IMAGES_PER_POST`] image ids are attached.
pub fn post_input(title: &str, content: &str, image_count: usize) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".into()));
    }
    if content.trim().is_empty() {
        return Err(ApiError::Validation("content is required".into()));
    }
    if image_count > MAX_IMAGES_PER_POST {
        return Err(ApiError::Validation(format!(
            "a post can have at most {MAX_IMAGES_PER_POST} images"
        )));
    }
    Ok(())
}

/// Validate an image upload before it leaves the client.
///
/// # Errors
///
/// `ApiError::Validation` for an unsupported content type or a file larger
/// than [`MAX_UPLOAD_BYTES`].
pub fn image_upload(mime_type: &str, size_bytes: u64) -> Result<(), ApiError> {
    if !ALLOWED_IMAGE_TYPES.contains(&mime_type) {
        return Err(ApiError::Validation(
            "unsupported image format (JPEG, PNG, GIF, or WebP only)".into(),
        ));
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ApiError::Validation(
            "image exceeds the 5MB upload limit".into(),
        ));
    }
    Ok(())
}

/// Map a file extension to its upload content type, if supported.
#[must_use]
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn login_requires_both_fields() {
        assert!(login_input("a@b.c", "pw").is_ok());
        assert!(login_input("  ", "pw").is_err());
        assert!(login_input("a@b.c", "").is_err());
    }

    #[rstest]
    #[case::ok("a@b.c", "longenough", "ada", true)]
    #[case::bad_email("not-an-email", "longenough", "ada", false)]
    #[case::short_password("a@b.c", "short", "ada", false)]
    #[case::short_nickname("a@b.c", "longenough", "x", false)]
    #[case::long_nickname("a@b.c", "longenough", &"x".repeat(51), false)]
    fn register_rules(
        #[case] email: &str,
        #[case] password: &str,
        #[case] nickname: &str,
        #[case] expect_ok: bool,
    ) {
        assert_eq!(register_input(email, password, nickname).is_ok(), expect_ok);
    }

    #[test]
    fn post_rejects_blank_and_overfull() {
        assert!(post_input("t", "c", 0).is_ok());
        assert!(post_input("t", "c", MAX_IMAGES_PER_POST).is_ok());
        assert!(post_input("  ", "c", 0).is_err());
        assert!(post_input("t", "", 0).is_err());
        assert!(post_input("t", "c", MAX_IMAGES_PER_POST + 1).is_err());
    }

    #[test]
    fn upload_rejects_oversize_and_wrong_type() {
        assert!(image_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
        assert!(image_upload("image/png", MAX_UPLOAD_BYTES + 1).is_err());
        assert!(image_upload("application/pdf", 10).is_err());
    }

    #[test]
    fn extensions_map_to_supported_types() {
        assert_eq!(mime_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("webp"), Some("image/webp"));
        assert_eq!(mime_for_extension("svg"), None);
    }
}
