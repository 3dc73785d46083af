//! API integration tests
//!
//! These run against a live server seeded with the default
//! configuration: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_most_lending_returns_ranked_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/reports/most-lending?topN=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array");
    assert!(books.len() <= 5);

    // Counts must be non-increasing.
    let counts: Vec<i64> = books
        .iter()
        .map(|entry| entry["count"].as_i64().expect("count is a number"))
        .collect();
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
#[ignore]
async fn test_most_lending_rejects_missing_top_n() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/reports/most-lending", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_availability_of_unknown_book_is_null() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/reports/book-availability/00000000-0000-0000-0000-000000000001",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_null());
}

#[tokio::test]
#[ignore]
async fn test_top_lenders_accepts_window_parameters() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/reports/top-lenders?startDate=2024-01-01&endDate=2024-12-31&topN=3",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let lenders = body.as_array().expect("Expected an array");
    assert!(lenders.len() <= 3);
}

#[tokio::test]
#[ignore]
async fn test_user_lending_history_of_unknown_user_is_empty() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/reports/user-lending-history/00000000-0000-0000-0000-000000000001",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore]
async fn test_related_books_of_unknown_book_is_empty() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/reports/related-books/00000000-0000-0000-0000-000000000001",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore]
async fn test_reading_rate_of_unknown_book_is_null() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/reports/reading-rate/00000000-0000-0000-0000-000000000001",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_null());
}

#[tokio::test]
#[ignore]
async fn test_rpc_most_borrowed_books() {
    let client = Client::new();

    let response = client
        .post(format!("{}/rpc/LibraryService/GetMostBorrowedBooks", BASE_URL))
        .json(&json!({ "topN": 3 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("Expected a books array");
    assert!(books.len() <= 3);
    for book in books {
        assert!(book["title"].is_string());
        assert!(book["borrowCount"].is_i64());
    }
}

#[tokio::test]
#[ignore]
async fn test_rpc_book_availability_parses_string_ids() {
    let client = Client::new();

    let response = client
        .post(format!("{}/rpc/LibraryService/GetBookAvailability", BASE_URL))
        .json(&json!({ "bookId": "00000000-0000-0000-0000-000000000001" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["totalCopies"].is_i64());

    let bad = client
        .post(format!("{}/rpc/LibraryService/GetBookAvailability", BASE_URL))
        .json(&json!({ "bookId": "not-a-uuid" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(bad.status(), 400);
}
