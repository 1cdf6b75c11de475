//! API integration tests
//!
//! Run with: cargo test -- --ignored
//! Requires a running server on localhost:8080 with a seeded librarian
//! account (librarian@athenaeum.org / librarian-password).

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const LIBRARIAN_EMAIL: &str = "librarian@athenaeum.org";
const LIBRARIAN_PASSWORD: &str = "librarian-password";

/// Register a throwaway member account and return its bearer token
async fn register_member(client: &Client, label: &str) -> (String, String) {
    let email = format!(
        "{}-{}@example.com",
        label,
        uuid::Uuid::new_v4().simple()
    );

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "member-password",
            "display_name": label
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let token = login(client, &email, "member-password").await;
    (email, token)
}

async fn login(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn create_book(client: &Client, token: &str, title: &str) -> String {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "tags": ["test"]
        }))
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_str().expect("No book ID").to_string()
}

async fn create_event(client: &Client, token: &str, title: &str) -> String {
    let response = client
        .post(format!("{}/events", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "start_time": "2027-03-01T18:00:00Z",
            "end_time": "2027-03-01T20:00:00Z",
            "location": "Reading Room"
        }))
        .send()
        .await
        .expect("Failed to send create event request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse event response");
    body["id"].as_str().expect("No event ID").to_string()
}

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
async fn test_register_and_login() {
    let client = Client::new();
    let (email, token) = register_member(&client, "reader").await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["role"], "member");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": LIBRARIAN_EMAIL,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_member_cannot_create_book() {
    let client = Client::new();
    let (_, member_token) = register_member(&client, "no-staff").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&member_token)
        .json(&json!({ "title": "Forbidden", "author": "Nobody" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_checkout_and_return_cycle() {
    let client = Client::new();
    let librarian_token = login(&client, LIBRARIAN_EMAIL, LIBRARIAN_PASSWORD).await;
    let (_, member_token) = register_member(&client, "borrower").await;

    let book_id = create_book(&client, &librarian_token, "Checkout Cycle").await;

    // Checkout succeeds and the book flips to borrowed
    let response = client
        .post(format!("{}/books/{}/checkout", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send checkout request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let borrow_id = body["borrow"]["id"].as_str().expect("No borrow ID").to_string();
    assert!(body["borrow"]["returned_at"].is_null());

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to fetch book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["status"], "borrowed");

    // A second checkout of a borrowed book is a conflict
    let response = client
        .post(format!("{}/books/{}/checkout", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send second checkout request");
    assert_eq!(response.status(), 409);

    // Return closes the borrow and restores availability
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send return request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["borrow"]["returned_at"].is_null());

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to fetch book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["status"], "available");

    // Returning the same borrow twice is a conflict
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .bearer_auth(&member_token)
        .send()
        .await
        .expect("Failed to send second return request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_other_member_cannot_return_borrow() {
    let client = Client::new();
    let librarian_token = login(&client, LIBRARIAN_EMAIL, LIBRARIAN_PASSWORD).await;
    let (_, borrower_token) = register_member(&client, "owner").await;
    let (_, other_token) = register_member(&client, "other").await;

    let book_id = create_book(&client, &librarian_token, "Protected Return").await;

    let response = client
        .post(format!("{}/books/{}/checkout", BASE_URL, book_id))
        .bearer_auth(&borrower_token)
        .send()
        .await
        .expect("Failed to send checkout request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let borrow_id = body["borrow"]["id"].as_str().expect("No borrow ID").to_string();

    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to send return request");
    assert_eq!(response.status(), 403);

    // Staff may return on the borrower's behalf
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .bearer_auth(&librarian_token)
        .send()
        .await
        .expect("Failed to send staff return request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_event_time_validation() {
    let client = Client::new();
    let (_, token) = register_member(&client, "planner").await;

    let response = client
        .post(format!("{}/events", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Backwards",
            "start_time": "2027-03-01T20:00:00Z",
            "end_time": "2027-03-01T18:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_double_invite_returns_same_token() {
    let client = Client::new();
    let (_, owner_token) = register_member(&client, "host").await;
    let event_id = create_event(&client, &owner_token, "Book Club").await;

    let invitee = format!("guest-{}@example.com", uuid::Uuid::new_v4().simple());

    let first: Value = client
        .post(format!("{}/events/{}/invitations", BASE_URL, event_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "invitee_email": invitee }))
        .send()
        .await
        .expect("Failed to send first invite")
        .json()
        .await
        .expect("Failed to parse first invite");
    assert_eq!(first["already_invited"], false);

    let second: Value = client
        .post(format!("{}/events/{}/invitations", BASE_URL, event_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "invitee_email": invitee.to_uppercase() }))
        .send()
        .await
        .expect("Failed to send second invite")
        .json()
        .await
        .expect("Failed to parse second invite");
    assert_eq!(second["already_invited"], true);
    assert_eq!(first["token"], second["token"]);

    // Exactly one invitation row exists for the pair
    let list: Value = client
        .get(format!("{}/events/{}/invitations", BASE_URL, event_id))
        .bearer_auth(&owner_token)
        .send()
        .await
        .expect("Failed to list invitations")
        .json()
        .await
        .expect("Failed to parse invitations");
    assert_eq!(list.as_array().expect("Not an array").len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_invitation_respond_is_one_shot() {
    let client = Client::new();
    let (_, owner_token) = register_member(&client, "host2").await;
    let event_id = create_event(&client, &owner_token, "Poetry Night").await;

    let invitee = format!("guest-{}@example.com", uuid::Uuid::new_v4().simple());
    let outcome: Value = client
        .post(format!("{}/events/{}/invitations", BASE_URL, event_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "invitee_email": invitee }))
        .send()
        .await
        .expect("Failed to send invite")
        .json()
        .await
        .expect("Failed to parse invite");
    let token = outcome["token"].as_str().expect("No token").to_string();

    // Accept via the public token flow (no auth)
    let response = client
        .post(format!("{}/invitations/{}/respond", BASE_URL, token))
        .json(&json!({ "response": "accepted" }))
        .send()
        .await
        .expect("Failed to send respond request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "accepted");

    // A second answer is rejected and the status stays accepted
    let response = client
        .post(format!("{}/invitations/{}/respond", BASE_URL, token))
        .json(&json!({ "response": "declined" }))
        .send()
        .await
        .expect("Failed to send second respond request");
    assert_eq!(response.status(), 409);

    let redeemed: Value = client
        .get(format!("{}/invitations/{}", BASE_URL, token))
        .send()
        .await
        .expect("Failed to redeem token")
        .json()
        .await
        .expect("Failed to parse redemption");
    assert_eq!(redeemed["invitation"]["status"], "accepted");
}

#[tokio::test]
#[ignore]
async fn test_self_invite_is_rejected() {
    let client = Client::new();
    let (email, owner_token) = register_member(&client, "selfhost").await;
    let event_id = create_event(&client, &owner_token, "Solo Show").await;

    let response = client
        .post(format!("{}/events/{}/invitations", BASE_URL, event_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "invitee_email": email }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_event_visibility() {
    let client = Client::new();
    let (_, owner_token) = register_member(&client, "visowner").await;
    let (guest_email, guest_token) = register_member(&client, "visguest").await;
    let (_, stranger_token) = register_member(&client, "stranger").await;

    let event_id = create_event(&client, &owner_token, "Hidden Gathering").await;

    let sees_event = |body: &Value| {
        body.as_array()
            .expect("Not an array")
            .iter()
            .any(|e| e["id"] == event_id.as_str())
    };

    // Neither guest nor stranger sees the event yet
    for token in [&guest_token, &stranger_token] {
        let body: Value = client
            .get(format!("{}/events", BASE_URL))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to list events")
            .json()
            .await
            .expect("Failed to parse events");
        assert!(!sees_event(&body));
    }

    // Invite the guest and accept via the token
    let outcome: Value = client
        .post(format!("{}/events/{}/invitations", BASE_URL, event_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "invitee_email": guest_email }))
        .send()
        .await
        .expect("Failed to send invite")
        .json()
        .await
        .expect("Failed to parse invite");
    let token = outcome["token"].as_str().expect("No token").to_string();

    client
        .post(format!("{}/invitations/{}/respond", BASE_URL, token))
        .json(&json!({ "response": "accepted" }))
        .send()
        .await
        .expect("Failed to accept invitation");

    // The accepted guest now sees it; the stranger still does not
    let body: Value = client
        .get(format!("{}/events", BASE_URL))
        .bearer_auth(&guest_token)
        .send()
        .await
        .expect("Failed to list events")
        .json()
        .await
        .expect("Failed to parse events");
    assert!(sees_event(&body));

    let body: Value = client
        .get(format!("{}/events", BASE_URL))
        .bearer_auth(&stranger_token)
        .send()
        .await
        .expect("Failed to list events")
        .json()
        .await
        .expect("Failed to parse events");
    assert!(!sees_event(&body));
}
