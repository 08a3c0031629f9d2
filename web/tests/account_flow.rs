//! Account, session, and profile flows over HTTP.
#![allow(clippy::unwrap_used)]

mod support;

use http::StatusCode;
use http::header;
use serde_json::{Value, json};
use support::{SUFFIX, get_json, login, post_json, signup, signup_and_login, test_server};

#[tokio::test]
async fn signup_enforces_domain_handles_and_uniqueness() {
    let server = test_server();

    let response = server
        .post("/signup")
        .json(&json!({
            "fullName": "Gail Gmail",
            "email": "gail@gmail.com",
            "password": "pw",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        format!("Invalid email. It must end with \"{SUFFIX}\".")
    );

    let response = server
        .post("/signup")
        .json(&json!({
            "fullName": "Carl Cash",
            "email": "carl@students.towson.edu",
            "password": "pw",
            "cashApp": "carl",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Invalid CashApp username. It must start with \"$\"."
    );

    let response = server
        .post("/signup")
        .json(&json!({
            "fullName": "Vera Venmo",
            "email": "vera@students.towson.edu",
            "password": "pw",
            "venmo": "vera",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Invalid Venmo username. It must start with \"@\"."
    );

    signup(&server, "Dana Dupe", "dana@students.towson.edu", "pw").await;
    let response = server
        .post("/signup")
        .json(&json!({
            "fullName": "Dana Again",
            "email": "dana@students.towson.edu",
            "password": "pw2",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "An account with this email already exists."
    );
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let server = test_server();
    signup(&server, "Lee Login", "lee@students.towson.edu", "right-pw").await;

    let response = server
        .post("/login")
        .json(&json!({ "email": "lee@students.towson.edu", "password": "wrong-pw" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], "Invalid credentials");

    let response = server
        .post("/login")
        .json(&json!({ "email": "nobody@students.towson.edu", "password": "right-pw" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_probe_tracks_login_and_logout() {
    let server = test_server();

    let probe: Value = server.get("/api/user").await.json();
    assert_eq!(probe["loggedIn"], false);

    let cookie = signup_and_login(&server, "Pat Probe", "pat@students.towson.edu").await;
    let probe: Value = server
        .get("/api/user")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .json();
    assert_eq!(probe["loggedIn"], true);
    assert_eq!(probe["user"]["email"], "pat@students.towson.edu");

    let response = server
        .get("/logout")
        .add_header(header::COOKIE, cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // The server-side session is gone even if the cookie is replayed.
    let probe: Value = server
        .get("/api/user")
        .add_header(header::COOKIE, cookie)
        .await
        .json();
    assert_eq!(probe["loggedIn"], false);
}

#[tokio::test]
async fn protected_endpoints_require_a_session() {
    let server = test_server();

    for path in [
        "/api/user/profile",
        "/api/user/cart",
        "/api/user/reservations",
        "/api/user/orderHistory",
        "/api/user/paymentHistory",
        "/api/reviews/seller",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
    }

    let response = server
        .post("/api/listings/reserve")
        .json(&json!({ "listingId": uuid::Uuid::new_v4() }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_updates_are_partial_and_validated() {
    let server = test_server();
    let cookie = signup_and_login(&server, "Una Update", "una@students.towson.edu").await;

    let profile = get_json(&server, &cookie, "/api/user/profile").await;
    assert_eq!(profile["name"], "Una Update");
    assert!(profile["cashApp"].is_null());

    // Handles are validated the same way as at signup.
    let response = post_json(
        &server,
        &cookie,
        "/api/user/profile/update",
        &json!({ "cashApp": "nodollar" }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // A partial update touches only the provided fields.
    let response = post_json(
        &server,
        &cookie,
        "/api/user/profile/update",
        &json!({ "fullName": "Una Updated", "cashApp": "$una" }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let profile = get_json(&server, &cookie, "/api/user/profile").await;
    assert_eq!(profile["name"], "Una Updated");
    assert_eq!(profile["cashApp"], "$una");
    assert_eq!(profile["email"], "una@students.towson.edu");
    assert!(profile["venmo"].is_null());
}

#[tokio::test]
async fn email_and_password_changes_take_effect() {
    let server = test_server();
    let cookie = signup_and_login(&server, "Eve Email", "eve@students.towson.edu").await;

    // The new email must carry the institutional suffix.
    let response = post_json(
        &server,
        &cookie,
        "/api/user/profile/update",
        &json!({ "newEmail": "eve@gmail.com" }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &server,
        &cookie,
        "/api/user/profile/update",
        &json!({ "newEmail": "evelyn@students.towson.edu", "newPassword": "new-pw" }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // The live session reflects the new email immediately.
    let probe: Value = server
        .get("/api/user")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .json();
    assert_eq!(probe["user"]["email"], "evelyn@students.towson.edu");

    // Old credentials are dead; the new pair works.
    let response = server
        .post("/login")
        .json(&json!({ "email": "eve@students.towson.edu", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    login(&server, "evelyn@students.towson.edu", "new-pw").await;
}

#[tokio::test]
async fn changing_email_cannot_take_an_existing_address() {
    let server = test_server();
    signup(&server, "Held Holder", "held@students.towson.edu", "pw").await;
    let cookie = signup_and_login(&server, "Mover Mover", "mover@students.towson.edu").await;

    let response = post_json(
        &server,
        &cookie,
        "/api/user/profile/update",
        &json!({ "newEmail": "held@students.towson.edu" }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "An account with this email already exists."
    );
}
