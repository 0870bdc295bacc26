//! REST endpoint paths consumed by the resource clients.

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_LOGOUT: &str = "/auth/logout";

pub const USERS_PROFILE: &str = "/users/profile";
pub const POSTS: &str = "/posts";
pub const IMAGES_UPLOAD: &str = "/images/upload";
pub const IMAGES_MY: &str = "/images/my";

#[must_use]
pub fn user_by_id(id: u64) -> String {
    format!("/users/{id}")
}

#[must_use]
pub fn post_by_id(id: u64) -> String {
    format!("/posts/{id}")
}

#[must_use]
pub fn image_by_id(id: u64) -> String {
    format!("/images/{id}")
}

/// Endpoints that are reachable without a session. A 401 from one of these
/// is a credential problem, not an expired access token, so the refresh
/// protocol must not fire.
#[must_use]
pub fn is_unauthenticated_auth_endpoint(path: &str) -> bool {
    matches!(path, AUTH_LOGIN | AUTH_REGISTER | AUTH_REFRESH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_is_exempt_but_logout_is_not() {
        assert!(is_unauthenticated_auth_endpoint(AUTH_LOGIN));
        assert!(is_unauthenticated_auth_endpoint(AUTH_REGISTER));
        assert!(is_unauthenticated_auth_endpoint(AUTH_REFRESH));
        assert!(!is_unauthenticated_auth_endpoint(AUTH_LOGOUT));
        assert!(!is_unauthenticated_auth_endpoint("/posts"));
    }
}
