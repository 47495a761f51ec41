//! End-to-end tests of the HTML pages through the full router.

mod common;

use axum::http::StatusCode;

use common::TestClient;

const SESSION_COOKIE: &str = "tally_session";

async fn registered_and_logged_in(name: &str) -> TestClient {
    let mut client = TestClient::new().await;
    let response = client
        .post_form("/register", &format!("name={name}&password=pw1"))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let response = client
        .post_form("/login", &format!("name={name}&password=pw1"))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/account"));
    client
}

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new().await;
    let response = client.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_index_for_anonymous_visitor() {
    let mut client = TestClient::new().await;
    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"href="/register""#));
    assert!(response.body.contains(r#"href="/login""#));
    assert!(!response.body.contains("Signed in as"));
}

#[tokio::test]
async fn test_full_account_scenario() {
    let mut client = TestClient::new().await;

    // Register
    let response = client.post_form("/register", "name=alice&password=pw1").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
    let page = client.follow(&response).await;
    assert!(page.body.contains("Registration successful, please log in."));
    assert!(client.cookie("notice").is_none());

    // Notice is shown once
    let page = client.get("/login").await;
    assert!(!page.body.contains("Registration successful"));

    // Duplicate name
    let response = client.post_form("/register", "name=alice&password=other").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body.contains("Name &#x27;alice&#x27; is already taken."));

    // Wrong password
    let response = client.post_form("/login", "name=alice&password=nope").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid name or password."));
    assert!(client.cookie(SESSION_COOKIE).is_none());

    // Login
    let response = client.post_form("/login", "name=alice&password=pw1").await;
    assert_eq!(response.location.as_deref(), Some("/account"));
    assert!(client.cookie(SESSION_COOKIE).is_some());
    let page = client.follow(&response).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Logged in successfully."));
    assert!(page.body.contains("Balance: <strong>0.00</strong>"));
    assert!(page.body.contains("No transactions yet."));

    // Deposit 100
    let response = client
        .post_form("/account", "operation=deposit&amount=100")
        .await;
    assert_eq!(response.location.as_deref(), Some("/account"));
    let page = client.follow(&response).await;
    assert!(page.body.contains("Transaction completed."));
    assert!(page.body.contains("Balance: <strong>100.00</strong>"));

    // Overdraw
    let response = client
        .post_form("/account", "operation=withdraw&amount=150")
        .await;
    let page = client.follow(&response).await;
    assert!(page.body.contains("notice-error"));
    assert!(page.body.contains("Invalid amount or insufficient funds."));
    assert!(page.body.contains("Balance: <strong>100.00</strong>"));

    // Withdraw 40
    let response = client
        .post_form("/account", "operation=withdraw&amount=40")
        .await;
    let page = client.follow(&response).await;
    assert!(page.body.contains("Transaction completed."));
    assert!(page.body.contains("Balance: <strong>60.00</strong>"));

    // History, newest first
    let page = client.get("/history").await;
    assert_eq!(page.status, StatusCode::OK);
    let withdrawal = page.body.find("<td>Withdrawal</td><td>40.00</td>").unwrap();
    let deposit = page.body.find("<td>Deposit</td><td>100.00</td>").unwrap();
    assert!(withdrawal < deposit);
    assert_eq!(page.body.matches("<tr><td>").count(), 2);

    // Logout
    let response = client.get("/logout").await;
    assert_eq!(response.location.as_deref(), Some("/"));
    assert!(client.cookie(SESSION_COOKIE).is_none());
    let page = client.follow(&response).await;
    assert!(page.body.contains("You have been logged out."));

    // Account is gone from reach
    let response = client.get("/account").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    for uri in ["/account", "/history"] {
        let mut client = TestClient::new().await;
        let response = client.get(uri).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/login"));

        let page = client.follow(&response).await;
        assert!(page.body.contains("Please log in first."));
    }

    let mut client = TestClient::new().await;
    let response = client
        .post_form("/account", "operation=deposit&amount=100")
        .await;
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_forged_session_cookie_is_rejected() {
    let mut client = TestClient::new().await;
    client.set_cookie(SESSION_COOKIE, "forged-token");

    let response = client.get("/account").await;
    assert_eq!(response.location.as_deref(), Some("/login"));
    assert!(client.cookie(SESSION_COOKIE).is_none());
}

#[tokio::test]
async fn test_invalid_input_is_reported() {
    let mut client = registered_and_logged_in("bob").await;

    for form in [
        "operation=deposit&amount=abc",
        "operation=deposit&amount=",
        "operation=transfer&amount=10",
        "operation=deposit",
    ] {
        let response = client.post_form("/account", form).await;
        let page = client.follow(&response).await;
        assert!(page.body.contains("Invalid amount."), "form: {form}");
    }

    for form in ["operation=deposit&amount=0", "operation=withdraw&amount=-5"] {
        let response = client.post_form("/account", form).await;
        let page = client.follow(&response).await;
        assert!(
            page.body.contains("Invalid amount or insufficient funds."),
            "form: {form}"
        );
    }

    let page = client.get("/account").await;
    assert!(page.body.contains("Balance: <strong>0.00</strong>"));
    assert!(page.body.contains("No transactions yet."));
}

#[tokio::test]
async fn test_index_when_logged_in() {
    let mut client = registered_and_logged_in("carol").await;
    let page = client.get("/").await;

    assert!(page.body.contains("Signed in as <strong>carol</strong>."));
    assert!(page.body.contains(r#"href="/logout""#));
}

#[tokio::test]
async fn test_blank_registration_is_rejected() {
    let mut client = TestClient::new().await;
    let response = client.post_form("/register", "name=+++&password=pw1").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Name is required."));
}

#[tokio::test]
async fn test_overlong_name_is_rejected() {
    let mut client = TestClient::new().await;
    let name = "n".repeat(101);
    let response = client
        .post_form("/register", &format!("name={name}&password=pw1"))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Name must be at most 100 characters."));

    let response = client
        .post_form("/login", &format!("name={name}&password=pw1"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session() {
    let mut client = TestClient::new().await;
    let response = client.get("/logout").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
}
