//! Integration tests for the session lifecycle and the resource clients,
//! run against an in-process mock backend.

mod support;

use mosaic_client::{ImagesApi, PostsApi, Session, UsersApi};
use mosaic_core::ApiError;
use pretty_assertions::assert_eq;
use support::{client_for, unauthorized, wrapped_auth_response, wrapped_user, MockBackend};

#[tokio::test]
async fn login_stores_both_tokens_and_sets_the_user() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/auth/login" => (200, wrapped_auth_response("acc_1", "ref_1", "ada")),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    let session = Session::new(client.clone());

    let user = session.login("ada@example.com", "pw123456").await.expect("login");

    assert_eq!(user.nickname, "ada");
    assert!(session.is_authenticated());
    assert_eq!(client.tokens().access_token().as_deref(), Some("acc_1"));
    assert_eq!(client.tokens().refresh_token().as_deref(), Some("ref_1"));
}

#[tokio::test]
async fn login_failure_leaves_prior_state_untouched() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/auth/login" => (401, r#"{"message":"invalid credentials"}"#.to_string()),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    let session = Session::new(client.clone());

    let result = session.login("ada@example.com", "wrong").await;

    let Err(ApiError::Application { status, message }) = result else {
        panic!("expected an application error");
    };
    assert_eq!(status, 401);
    assert_eq!(message, "invalid credentials");
    assert!(!session.is_authenticated());
    assert!(!client.tokens().has_both());
}

#[tokio::test]
async fn login_then_logout_leaves_no_tokens_behind() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/auth/login" => (200, wrapped_auth_response("acc_1", "ref_1", "ada")),
        "/auth/logout" => (200, r#"{"message":"ok"}"#.to_string()),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    let session = Session::new(client.clone());

    session.login("ada@example.com", "pw123456").await.expect("login");
    session.logout().await;

    assert!(!session.is_authenticated());
    assert!(!client.tokens().has_both());
    assert_eq!(client.tokens().access_token(), None);
    assert_eq!(client.tokens().refresh_token(), None);

    // The backend was informed with the refresh token.
    let logout_calls: Vec<_> = backend
        .requests()
        .into_iter()
        .filter(|r| r.path == "/auth/logout")
        .collect();
    assert_eq!(logout_calls.len(), 1);
    assert!(logout_calls[0].body.contains("ref_1"));
}

#[tokio::test]
async fn logout_succeeds_locally_even_when_the_backend_fails() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/auth/login" => (200, wrapped_auth_response("acc_1", "ref_1", "ada")),
        "/auth/logout" => (500, r#"{"message":"boom"}"#.to_string()),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    let session = Session::new(client.clone());

    session.login("ada@example.com", "pw123456").await.expect("login");
    session.logout().await;

    assert!(!session.is_authenticated());
    assert!(!client.tokens().has_both());
}

#[tokio::test]
async fn stale_tokens_at_startup_are_cleared_silently() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/users/profile" => unauthorized(),
        "/auth/refresh" => unauthorized(),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    client
        .tokens()
        .set_pair("expired_acc", "expired_ref")
        .expect("seed stale tokens");
    let session = Session::new(client.clone());

    assert!(session.is_loading());
    session.bootstrap().await;

    // The expected stale-session path: no error, just unauthenticated.
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert!(!client.tokens().has_both());
}

#[tokio::test]
async fn valid_tokens_at_startup_restore_the_user() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    // Bare (un-enveloped) profile body: both shapes must restore the user.
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/users/profile" => (
            200,
            r#"{"id":1,"email":"ada@example.com","nickname":"ada"}"#.to_string(),
        ),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    client.tokens().set_pair("acc_1", "ref_1").expect("seed tokens");
    let session = Session::new(client.clone());

    session.bootstrap().await;

    assert!(session.is_authenticated());
    assert_eq!(session.current_user().expect("user").nickname, "ada");
}

#[tokio::test]
async fn bootstrap_without_tokens_skips_the_profile_fetch() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|_req| support::not_found());
    let client = client_for(&backend.base_url, tmp.path());
    let session = Session::new(client);

    session.bootstrap().await;

    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert_eq!(backend.requests().len(), 0);
}

#[tokio::test]
async fn failed_background_refresh_keeps_the_previous_user() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/auth/login" => (200, wrapped_auth_response("acc_1", "ref_1", "ada")),
        "/users/profile" => (500, r#"{"message":"flaky"}"#.to_string()),
        "/auth/refresh" => unauthorized(),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    let session = Session::new(client);

    session.login("ada@example.com", "pw123456").await.expect("login");
    session.refresh_user().await;

    // The 500 is swallowed; the user from login is retained.
    assert!(session.is_authenticated());
    assert_eq!(session.current_user().expect("user").nickname, "ada");
}

#[tokio::test]
async fn create_post_without_images_yields_an_empty_gallery() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match (req.method.as_str(), req.path.as_str()) {
        ("POST", "/posts") => (
            201,
            // Create response carries no images field at all.
            r#"{"success":true,"data":{"id":10,"userId":1,"title":"hello","content":"world"}}"#
                .to_string(),
        ),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    client.tokens().set_pair("acc_1", "ref_1").expect("seed tokens");

    let post = PostsApi::new(client)
        .create("hello", "world", &[])
        .await
        .expect("create");

    assert_eq!(post.images, vec![]);
    // No imageIds key was sent for an image-less post.
    let create_call = &backend.requests()[0];
    assert!(!create_call.body.contains("imageIds"));
}

#[tokio::test]
async fn feed_request_defaults_pagination_parameters() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/posts" => (
            200,
            r#"{"success":true,"data":{"posts":[],"total":0,"page":1,"limit":10}}"#.to_string(),
        ),
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());

    let posts = PostsApi::new(client.clone());
    posts.list(None, None, None).await.expect("default page");
    posts.list(Some(3), Some(5), Some(42)).await.expect("filtered page");

    let calls = backend.requests();
    assert_eq!(calls[0].query, "page=1&limit=10");
    assert_eq!(calls[1].query, "page=3&limit=5&userId=42");
}

#[tokio::test]
async fn oversized_uploads_are_rejected_before_any_network_call() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let backend = MockBackend::start(|_req| support::not_found());
    let client = client_for(&backend.base_url, tmp.path());
    let images = ImagesApi::new(client);

    let oversized = vec![0u8; 5 * 1024 * 1024 + 1];
    for _ in 0..2 {
        let result = images.upload("big.png", "image/png", oversized.clone()).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    assert_eq!(backend.requests().len(), 0, "nothing should hit the wire");
}

#[tokio::test]
async fn wrapped_and_bare_profiles_normalize_identically() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let hits = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let handler_hits = std::sync::Arc::clone(&hits);
    let backend = MockBackend::start(move |req| match req.path.as_str() {
        "/users/profile" => {
            let n = handler_hits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n == 0 {
                (200, wrapped_user(1, "ada"))
            } else {
                (
                    200,
                    r#"{"id":1,"email":"ada@example.com","nickname":"ada","profileImage":null,"bio":null}"#
                        .to_string(),
                )
            }
        }
        _ => support::not_found(),
    });
    let client = client_for(&backend.base_url, tmp.path());
    let users = UsersApi::new(client);

    let enveloped = users.profile().await.expect("wrapped profile");
    let bare = users.profile().await.expect("bare profile");
    assert_eq!(enveloped, bare);
}
