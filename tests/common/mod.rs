#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use employee_directory_api::config::AppConfig;
use employee_directory_api::database::{MemoryEmployeeStore, MemoryUserStore};
use employee_directory_api::storage::MemoryImageStore;
use employee_directory_api::{app, AppState};

pub const USER_NAME: &str = "admin01";
pub const PASSWORD: &str = "Secret#123";

const BOUNDARY: &str = "employee-test-boundary";

/// Router over in-memory stores, with handles kept for assertions
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
    pub employees: Arc<MemoryEmployeeStore>,
    pub images: Arc<MemoryImageStore>,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// File part for multipart requests
pub struct TestFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl TestFile {
    pub fn png() -> Self {
        Self {
            file_name: "photo.png",
            content_type: "image/png",
            bytes: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
        }
    }

    pub fn gif() -> Self {
        Self {
            file_name: "photo.gif",
            content_type: "image/gif",
            bytes: b"GIF89a".to_vec(),
        }
    }

    /// What a browser submits for a file input left empty
    pub fn untouched_input() -> Self {
        Self {
            file_name: "",
            content_type: "application/octet-stream",
            bytes: Vec::new(),
        }
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::development())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let employees = Arc::new(MemoryEmployeeStore::new());
        let images = Arc::new(MemoryImageStore::new(config.images.folder.clone()));

        let state = AppState::new(config, users.clone(), employees.clone(), images.clone(), None);

        Self {
            router: app(state),
            users,
            employees,
            images,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router failed")?;

        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
        };

        Ok(TestResponse { status, body })
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string()))?).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty())?).await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        fields: &[(&str, &str)],
        image: Option<TestFile>,
        token: &str,
    ) -> Result<TestResponse> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if let Some(file) = image {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    BOUNDARY, file.file_name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(&file.bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body))?;
        self.send(request).await
    }

    pub async fn register(&self, user_name: &str, password: &str) -> Result<TestResponse> {
        self.json(
            Method::POST,
            "/api/v1/auth/register",
            json!({ "userName": user_name, "pwd": password }),
            None,
        )
        .await
    }

    pub async fn login(&self, user_name: &str, password: &str) -> Result<TestResponse> {
        self.json(
            Method::POST,
            "/api/v1/auth/login",
            json!({ "userName": user_name, "pwd": password }),
            None,
        )
        .await
    }

    /// Registers the default user and returns a fresh access token
    pub async fn access_token(&self) -> Result<String> {
        self.register(USER_NAME, PASSWORD).await?;
        let res = self.login(USER_NAME, PASSWORD).await?;
        res.body["authToken"]
            .as_str()
            .map(str::to_string)
            .context("login returned no authToken")
    }

    /// Creates an employee through the API and returns its JSON
    pub async fn create_employee(&self, token: &str, email: &str) -> Result<Value> {
        let res = self
            .multipart(
                Method::POST,
                "/api/v1/employees",
                &employee_fields(email),
                Some(TestFile::png()),
                token,
            )
            .await?;
        anyhow::ensure!(
            res.status == StatusCode::CREATED,
            "create failed: {} {}",
            res.status,
            res.body
        );
        Ok(res.body["data"].clone())
    }
}

pub fn employee_fields(email: &str) -> Vec<(&'static str, &str)> {
    vec![
        ("name", "Asha Rao"),
        ("email", email),
        ("mobile", "+91 9876543210"),
        ("designation", "manager"),
        ("gender", "f"),
        ("course", "mca"),
    ]
}
