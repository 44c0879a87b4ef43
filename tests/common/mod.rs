//! Shared helpers: drive the full router in-process, no socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use grub_dash::gateway::{router, state::AppState};

pub struct TestApp {
    router: Router,
    pub state: Arc<AppState>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn data(&self) -> Value {
        self.json()["data"].clone()
    }

    pub fn message(&self) -> String {
        self.json()["message"].as_str().unwrap().to_string()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let state = Arc::new(state);
        Self {
            router: router(state.clone()),
            state,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            body: body.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Wraps `data` in the request envelope
    pub async fn post(&self, uri: &str, data: Value) -> TestResponse {
        let body = serde_json::json!({ "data": data }).to_string();
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, data: Value) -> TestResponse {
        let body = serde_json::json!({ "data": data }).to_string();
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn count(&self, uri: &str) -> usize {
        self.get(uri).await.data().as_array().unwrap().len()
    }
}
