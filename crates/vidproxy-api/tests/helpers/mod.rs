//! Test helpers: build the router around in-memory storage.
//!
//! Run from workspace root: `cargo test -p vidproxy-api`.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::Arc;
use vidproxy_api::setup;
use vidproxy_core::Config;
use vidproxy_storage::MemoryStorage;

pub const TEST_ORIGIN: &str = "http://127.0.0.1:5500";
pub const MEMORY_BASE_URL: &str = "http://localhost:5000/memory";

/// Test application: server plus a handle on the same storage it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut env: HashMap<String, String> = HashMap::from([
        ("STORAGE_BACKEND".to_string(), "memory".to_string()),
        ("CORS_ORIGIN".to_string(), TEST_ORIGIN.to_string()),
    ]);
    for (k, v) in extra {
        env.insert(k.to_string(), v.to_string());
    }
    Config::from_vars(|k| env.get(k).cloned()).expect("valid test config")
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

pub async fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let storage = MemoryStorage::new(MEMORY_BASE_URL);
    let (_state, router) = setup::build_app(test_config(extra), Arc::new(storage.clone()))
        .await
        .expect("build app");
    let server = TestServer::new(router).expect("start test server");
    TestApp { server, storage }
}

pub fn video_form(file_name: &str, data: &[u8], title: Option<&str>) -> MultipartForm {
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_type("video/mp4"),
    );
    match title {
        Some(title) => form.add_text("title", title.to_string()),
        None => form,
    }
}
