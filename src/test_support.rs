//! Helpers for driving the full router in tests.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{app::build_app, auth::basic::encode_basic, state::AppState};

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            router: build_app(AppState::fake()),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        auth: Option<(&str, &str)>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((name, secret)) = auth {
            builder = builder.header(header::AUTHORIZATION, encode_basic(name, secret));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    /// Signs up a user whose password is `"x"`.
    pub async fn signup(&self, first: &str, last: &str, email: &str) {
        let res = self
            .request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({
                    "firstName": first,
                    "lastName": last,
                    "emailAddress": email,
                    "password": "x",
                })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    /// Creates a course as `email` and returns its id.
    pub async fn create_course(&self, email: &str, title: &str) -> i64 {
        let res = self
            .request(
                Method::POST,
                "/api/courses",
                Some((email, "x")),
                Some(json!({ "title": title, "description": "About it" })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let location = location(&res);
        location
            .rsplit('/')
            .next()
            .and_then(|id| id.parse().ok())
            .unwrap()
    }
}

pub fn location(res: &Response) -> String {
    res.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_bytes(res: Response) -> Vec<u8> {
    axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(res: Response) -> Value {
    serde_json::from_slice(&body_bytes(res).await).unwrap()
}
