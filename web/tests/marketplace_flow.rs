//! End-to-end marketplace flows over HTTP.
#![allow(clippy::unwrap_used)]

mod support;

use http::StatusCode;
use http::header;
use serde_json::{Value, json};
use support::{
    create_listing, get_json, my_listing_id, post_json, post_listing_form, signup_and_login,
    test_server,
};

#[tokio::test]
async fn full_sale_from_listing_to_review() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s@students.towson.edu").await;
    let buyer = signup_and_login(&server, "Bea Buyer", "b@students.towson.edu").await;

    create_listing(&server, &seller, "MacBook Pro 2020", "350").await;
    let id = my_listing_id(&server, &seller, "MacBook Pro 2020").await;

    // Visible in browse, with the seller joined and no rating yet.
    let cards: Value = server.get("/api/listings").await.json();
    assert_eq!(cards.as_array().unwrap().len(), 1);
    let card = &cards[0];
    assert_eq!(card["sellerName"], "Sam Seller");
    assert_eq!(card["sellerEmail"], "s@students.towson.edu");
    assert!(card["averageRating"].is_null());
    assert_eq!(card["reviewCount"], 0);

    // Reserve hides the listing from browse and fills the cart.
    let response = post_json(
        &server,
        &buyer,
        "/api/listings/reserve",
        &json!({ "listingId": id }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Item reserved successfully");

    let cards: Value = server.get("/api/listings").await.json();
    assert!(cards.as_array().unwrap().is_empty());

    let cart = get_json(&server, &buyer, "/api/user/cart").await;
    assert_eq!(cart.as_array().unwrap().len(), 1);
    assert_eq!(cart[0]["paymentStatus"], "unpaid");
    assert_eq!(cart[0]["seller"]["name"], "Sam Seller");
    assert_eq!(cart[0]["seller"]["cashApp"], "Not provided");

    // The seller sees the inbound reservation with the buyer joined.
    let reservations = get_json(&server, &seller, "/api/user/reservations").await;
    assert_eq!(reservations.as_array().unwrap().len(), 1);
    assert_eq!(reservations[0]["buyerName"], "Bea Buyer");
    assert_eq!(reservations[0]["buyerEmail"], "b@students.towson.edu");
    assert_eq!(reservations[0]["listing"]["reserved"], true);

    // Payment claim: cart empties, the reservation stays until receipt.
    let response = post_json(
        &server,
        &buyer,
        "/api/listings/markAsPaid",
        &json!({ "listingId": id, "transactionId": "TX1" }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Payment marked as paid");

    let cart = get_json(&server, &buyer, "/api/user/cart").await;
    assert!(cart.as_array().unwrap().is_empty());
    let reservations = get_json(&server, &seller, "/api/user/reservations").await;
    assert_eq!(reservations[0]["listing"]["paymentStatus"], "paid");
    assert_eq!(reservations[0]["listing"]["transactionId"], "TX1");

    // Receipt completes the sale and writes both histories.
    let response = post_json(
        &server,
        &seller,
        "/api/listings/markAsReceived",
        &json!({ "listingId": id }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Order marked as received and completed");

    let reservations = get_json(&server, &seller, "/api/user/reservations").await;
    assert!(reservations.as_array().unwrap().is_empty());

    let orders = get_json(&server, &seller, "/api/user/orderHistory").await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["listingTitle"], "MacBook Pro 2020");
    assert_eq!(orders[0]["buyerEmail"], "b@students.towson.edu");
    assert_eq!(orders[0]["transactionId"], "TX1");

    let payments = get_json(&server, &buyer, "/api/user/paymentHistory").await;
    assert_eq!(payments.as_array().unwrap().len(), 1);
    assert_eq!(payments[0]["sellerEmail"], "s@students.towson.edu");
    assert_eq!(payments[0]["transactionId"], "TX1");

    // The buyer reviews the seller; the aggregate reflects it.
    let response = post_json(
        &server,
        &buyer,
        "/api/user/reviews",
        &json!({
            "transactionId": "TX1",
            "sellerEmail": "s@students.towson.edu",
            "rating": 5,
            "comment": "Smooth handoff",
        }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let ratings: Value = server.get("/api/reviews/aggregate-ratings").await.json();
    assert_eq!(ratings.as_array().unwrap().len(), 1);
    assert_eq!(ratings[0]["sellerEmail"], "s@students.towson.edu");
    assert_eq!(ratings[0]["averageRating"].as_f64().unwrap(), 5.0);
    assert_eq!(ratings[0]["reviewCount"], 1);

    let reviews: Value = server
        .get("/api/user/reviews/s@students.towson.edu")
        .await
        .json();
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["rating"], 5);
    assert_eq!(reviews[0]["reviewerEmail"], "b@students.towson.edu");
}

#[tokio::test]
async fn reserving_twice_conflicts_and_release_reopens() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s2@students.towson.edu").await;
    let first = signup_and_login(&server, "First Buyer", "f@students.towson.edu").await;
    let second = signup_and_login(&server, "Second Buyer", "g@students.towson.edu").await;

    create_listing(&server, &seller, "Desk Lamp", "15").await;
    let id = my_listing_id(&server, &seller, "Desk Lamp").await;
    let body = json!({ "listingId": id });

    let response = post_json(&server, &first, "/api/listings/reserve", &body).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = post_json(&server, &second, "/api/listings/reserve", &body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Listing is already reserved"
    );

    // Only the holder can release.
    let response = post_json(&server, &second, "/api/user/cart/remove", &body).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = post_json(&server, &first, "/api/user/cart/remove", &body).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.text(),
        "Item removed from cart and unmarked as reserved"
    );

    // Back in browse and reservable by the other buyer.
    let cards: Value = server.get("/api/listings").await.json();
    assert_eq!(cards.as_array().unwrap().len(), 1);
    let response = post_json(&server, &second, "/api/listings/reserve", &body).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn payment_and_receipt_enforce_actors() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s3@students.towson.edu").await;
    let buyer = signup_and_login(&server, "Bea Buyer", "b3@students.towson.edu").await;
    let other = signup_and_login(&server, "Odd One", "o3@students.towson.edu").await;

    create_listing(&server, &seller, "Bike", "80").await;
    let id = my_listing_id(&server, &seller, "Bike").await;
    post_json(&server, &buyer, "/api/listings/reserve", &json!({ "listingId": id })).await;

    // A blank transaction ID is rejected before anything else.
    let response = post_json(
        &server,
        &buyer,
        "/api/listings/markAsPaid",
        &json!({ "listingId": id, "transactionId": "   " }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Transaction ID is required");

    // Only the reserving buyer can claim payment.
    let response = post_json(
        &server,
        &other,
        "/api/listings/markAsPaid",
        &json!({ "listingId": id, "transactionId": "TX9" }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["message"], "Unauthorized action");

    // The seller cannot confirm receipt before payment.
    let response = post_json(
        &server,
        &seller,
        "/api/listings/markAsReceived",
        &json!({ "listingId": id }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Listing has not been paid for"
    );

    post_json(
        &server,
        &buyer,
        "/api/listings/markAsPaid",
        &json!({ "listingId": id, "transactionId": "TX9" }),
    )
    .await;

    // Only the seller can confirm receipt.
    let response = post_json(
        &server,
        &buyer,
        "/api/listings/markAsReceived",
        &json!({ "listingId": id }),
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["message"], "Unauthorized action");
}

#[tokio::test]
async fn deletion_is_blocked_once_a_buyer_is_involved() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s4@students.towson.edu").await;
    let buyer = signup_and_login(&server, "Bea Buyer", "b4@students.towson.edu").await;

    create_listing(&server, &seller, "Textbook", "30").await;
    let id = my_listing_id(&server, &seller, "Textbook").await;
    let body = json!({ "listingId": id });

    post_json(&server, &buyer, "/api/listings/reserve", &body).await;
    let response = server
        .delete(&format!("/api/listings/{id}"))
        .add_header(header::COOKIE, seller.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Listing cannot be deleted because it is reserved."
    );

    post_json(
        &server,
        &buyer,
        "/api/listings/markAsPaid",
        &json!({ "listingId": id, "transactionId": "TX4" }),
    )
    .await;
    let response = server
        .delete(&format!("/api/listings/{id}"))
        .add_header(header::COOKIE, seller.clone())
        .await;
    assert_eq!(
        response.json::<Value>()["message"],
        "Listing cannot be deleted because it has been paid for."
    );

    post_json(&server, &seller, "/api/listings/markAsReceived", &body).await;
    let response = server
        .delete(&format!("/api/listings/{id}"))
        .add_header(header::COOKIE, seller.clone())
        .await;
    assert_eq!(
        response.json::<Value>()["message"],
        "Listing cannot be deleted because the transaction is completed."
    );
}

#[tokio::test]
async fn available_listings_can_be_deleted() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s5@students.towson.edu").await;
    create_listing(&server, &seller, "Chair", "10").await;
    let id = my_listing_id(&server, &seller, "Chair").await;

    let response = server
        .delete(&format!("/api/listings/{id}"))
        .add_header(header::COOKIE, seller.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Listing deleted successfully");

    // Gone from both views; a second delete reports not found.
    let cards: Value = server.get("/api/listings").await.json();
    assert!(cards.as_array().unwrap().is_empty());
    let response = server
        .delete(&format!("/api/listings/{id}"))
        .add_header(header::COOKIE, seller.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn browse_supports_search_and_inline_images() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s6@students.towson.edu").await;

    let fields = [
        ("title", "Mini Fridge"),
        ("description", "Dorm sized, runs quiet"),
        ("contactInfo", "text 555-1234"),
        ("price", "45"),
        ("condition", "Like New"),
        ("location", "West Village"),
    ];
    let response =
        post_listing_form(&server, &seller, &fields, Some(("image/png", &[1, 2, 3]))).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    create_listing(&server, &seller, "Desk", "20").await;

    // Case-insensitive substring match over title and description.
    let cards: Value = server
        .get("/api/listings")
        .add_query_param("search", "fridge")
        .await
        .json();
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["title"], "Mini Fridge");
    assert_eq!(cards[0]["condition"], "Like New");
    // [1, 2, 3] encodes as "AQID".
    assert_eq!(cards[0]["image"], "data:image/png;base64,AQID");

    let cards: Value = server
        .get("/api/listings")
        .add_query_param("search", "QUIET")
        .await
        .json();
    assert_eq!(cards.as_array().unwrap().len(), 1);

    let cards: Value = server
        .get("/api/listings")
        .add_query_param("search", "sofa")
        .await
        .json();
    assert!(cards.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn listing_updates_revalidate_fields() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s7@students.towson.edu").await;
    create_listing(&server, &seller, "Monitor", "60").await;
    let id = my_listing_id(&server, &seller, "Monitor").await;

    let response = server
        .put(&format!("/api/listings/{id}"))
        .add_header(header::COOKIE, seller.clone())
        .json(&json!({ "price": 55.0, "condition": "Like New", "location": "Union" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["price"].as_f64().unwrap(), 55.0);
    assert_eq!(updated["condition"], "Like New");
    assert_eq!(updated["location"], "Union");

    let response = server
        .put(&format!("/api/listings/{id}"))
        .add_header(header::COOKIE, seller.clone())
        .json(&json!({ "price": -5.0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Invalid price. It must be a positive number."
    );

    let response = server
        .put(&format!("/api/listings/{}", uuid::Uuid::new_v4()))
        .add_header(header::COOKIE, seller.clone())
        .json(&json!({ "price": 10.0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_creation_validates_every_field() {
    let server = test_server();
    let seller = signup_and_login(&server, "Sam Seller", "s8@students.towson.edu").await;

    let cases: [(&str, &str, &str); 3] = [
        ("price", "free", "Invalid price. It must be a positive number."),
        (
            "condition",
            "Mint",
            "Invalid condition. It must be one of: New, Like New, Used.",
        ),
        ("location", "   ", "Location details are required."),
    ];
    for (field, bad_value, message) in cases {
        let fields: Vec<(&str, &str)> = [
            ("title", "Kettle"),
            ("description", "Electric kettle"),
            ("contactInfo", "text 555-1234"),
            ("price", "12"),
            ("condition", "New"),
            ("location", "Library"),
        ]
        .into_iter()
        .map(|(name, value)| (name, if name == field { bad_value } else { value }))
        .collect();

        let response = post_listing_form(&server, &seller, &fields, None).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], message);
    }

    // Missing required text field.
    let fields = [
        ("description", "Electric kettle"),
        ("contactInfo", "text 555-1234"),
        ("price", "12"),
        ("condition", "New"),
        ("location", "Library"),
    ];
    let response = post_listing_form(&server, &seller, &fields, None).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Title is required.");

    // Nothing was created along the way.
    let cards: Value = server.get("/api/listings").await.json();
    assert!(cards.as_array().unwrap().is_empty());
}
