//! In-process mock backend for integration tests.
//!
//! A `tiny_http` server on a random loopback port, driven by a
//! per-test handler closure. Every request is recorded so tests can assert
//! on call counts, bearer headers, and bodies after the fact.

#![allow(dead_code)]

use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mosaic_auth::TokenStore;
use mosaic_client::ApiClient;
use mosaic_config::MosaicConfig;

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl ReceivedRequest {
    pub fn bearer(&self) -> Option<&str> {
        self.authorization.as_deref()?.strip_prefix("Bearer ")
    }
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
    stop: Arc<AtomicBool>,
}

impl MockBackend {
    /// Start the server. `handler` maps each request to `(status, json body)`.
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&ReceivedRequest) -> (u16, String) + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock backend");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("mock backend port");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let thread_requests = Arc::clone(&requests);
        let thread_stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            loop {
                if thread_stop.load(Ordering::SeqCst) {
                    break;
                }
                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(request)) => request,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let method = request.method().to_string();
                let url = request.url().to_string();
                let (path, query) = match url.split_once('?') {
                    Some((p, q)) => (p.to_string(), q.to_string()),
                    None => (url, String::new()),
                };
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.to_string());
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let received = ReceivedRequest {
                    method,
                    path,
                    query,
                    authorization,
                    body,
                };
                thread_requests
                    .lock()
                    .expect("requests lock")
                    .push(received.clone());

                let (status, response_body) = handler(&received);
                let response = tiny_http::Response::from_string(response_body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json")
                            .expect("header"),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
            stop,
        }
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Number of recorded requests matching method + path.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// Client wired to `base_url` with a hermetic file-only token store.
pub fn client_for(base_url: &str, credentials_dir: &Path) -> ApiClient {
    let mut config = MosaicConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = 5;
    ApiClient::new(&config, TokenStore::file_only(credentials_dir))
}

/// A wrapped user body as the backend returns it.
pub fn wrapped_user(id: u64, nickname: &str) -> String {
    serde_json::json!({
        "success": true,
        "data": {
            "id": id,
            "email": format!("{nickname}@example.com"),
            "nickname": nickname,
            "profileImage": null,
            "bio": null
        }
    })
    .to_string()
}

/// A wrapped login/register response.
pub fn wrapped_auth_response(access: &str, refresh: &str, nickname: &str) -> String {
    serde_json::json!({
        "success": true,
        "data": {
            "accessToken": access,
            "refreshToken": refresh,
            "user": {
                "id": 1,
                "email": format!("{nickname}@example.com"),
                "nickname": nickname
            }
        }
    })
    .to_string()
}

pub fn unauthorized() -> (u16, String) {
    (401, r#"{"message":"Unauthorized"}"#.to_string())
}

pub fn not_found() -> (u16, String) {
    (404, r#"{"message":"Not Found"}"#.to_string())
}
