//! Shared helpers for the HTTP integration tests.
#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use axum_test::{TestResponse, TestServer};
use campus_market_store::{
    MemoryListingStore, MemoryReviewStore, MemorySessionStore, MemoryUserStore,
};
use campus_market_web::{AppConfig, AppState, app_router};
use http::StatusCode;
use http::header::{self, HeaderValue};
use serde_json::{Value, json};

/// The default institutional email suffix the tests sign up under.
pub const SUFFIX: &str = "@students.towson.edu";

/// Fixed multipart boundary for hand-built form bodies.
pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Start a server over fresh in-memory stores.
pub fn test_server() -> TestServer {
    let state = AppState::new(
        MemoryUserStore::new(),
        MemoryListingStore::new(),
        MemoryReviewStore::new(),
        MemorySessionStore::new(),
        AppConfig::new(),
    );
    TestServer::new(app_router(state)).unwrap()
}

/// Sign up an account and assert it succeeded.
pub async fn signup(server: &TestServer, name: &str, email: &str, password: &str) {
    let response = server
        .post("/signup")
        .json(&json!({
            "fullName": name,
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
}

/// Log in and return the session cookie pair for later requests.
pub async fn login(server: &TestServer, email: &str, password: &str) -> HeaderValue {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());

    let set_cookie = response.header(header::SET_COOKIE);
    let pair = set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    HeaderValue::from_str(&pair).unwrap()
}

/// Sign up and log in, returning the session cookie.
pub async fn signup_and_login(server: &TestServer, name: &str, email: &str) -> HeaderValue {
    signup(server, name, email, "password123").await;
    login(server, email, "password123").await
}

/// Build a multipart body from text fields plus an optional image
/// part.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((mime, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"item.png\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Post a multipart listing-creation form.
pub async fn post_listing_form(
    server: &TestServer,
    cookie: &HeaderValue,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> TestResponse {
    server
        .post("/createListing")
        .add_header(header::COOKIE, cookie.clone())
        .content_type(&format!("multipart/form-data; boundary={BOUNDARY}"))
        .bytes(multipart_body(fields, image).into())
        .await
}

/// Create a listing with sensible defaults and assert it succeeded.
pub async fn create_listing(server: &TestServer, cookie: &HeaderValue, title: &str, price: &str) {
    let fields = [
        ("title", title),
        ("description", "A well-loved item"),
        ("contactInfo", "text 555-1234"),
        ("price", price),
        ("condition", "Used"),
        ("location", "Campus Library"),
    ];
    let response = post_listing_form(server, cookie, &fields, None).await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
}

/// Find the ID of one of the caller's own listings by title.
pub async fn my_listing_id(server: &TestServer, cookie: &HeaderValue, title: &str) -> String {
    let listings: Value = server
        .get("/api/user/listings")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .json();
    listings
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["title"] == title)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// POST a JSON body with a session cookie.
pub async fn post_json(
    server: &TestServer,
    cookie: &HeaderValue,
    path: &str,
    body: &Value,
) -> TestResponse {
    server
        .post(path)
        .add_header(header::COOKIE, cookie.clone())
        .json(body)
        .await
}

/// GET a path with a session cookie and parse the JSON body.
pub async fn get_json(server: &TestServer, cookie: &HeaderValue, path: &str) -> Value {
    let response = server
        .get(path)
        .add_header(header::COOKIE, cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    response.json()
}
