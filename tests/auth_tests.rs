
use reqwest::StatusCode;
use test_utils::*;

#[actix_rt::test]
async fn login_returns_token_for_valid_credentials() {
    let app = TestApp::spawn().await;

    let token = app.login().await;

    assert!(!token.is_empty());
    app.cleanup();
}

#[actix_rt::test]
async fn login_with_wrong_credentials_returns_401() {
    let app = TestApp::spawn().await;

    let response = app.try_login(TEST_USERNAME, "wrong-password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    app.cleanup();
}

#[actix_rt::test]
async fn login_with_blank_credentials_returns_400() {
    let app = TestApp::spawn().await;

    let response = app.try_login("", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    app.cleanup();
}

#[actix_rt::test]
async fn repeated_login_failures_are_throttled() {
    let app = TestApp::spawn().await;

    for _ in 0..app.config.login_max_attempts {
        let response = app.try_login(TEST_USERNAME, "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is rejected once the address is locked out.
    let response = app.try_login(TEST_USERNAME, TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    app.cleanup();
}

#[actix_rt::test]
async fn gated_route_without_token_returns_401() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/v1/cards", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    app.cleanup();
}

#[actix_rt::test]
async fn gated_route_with_unknown_token_returns_401() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/v1/cards", app.address))
        .bearer_auth("not-a-session-token")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    app.cleanup();
}

#[actix_rt::test]
async fn logout_invalidates_the_token() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .client
        .post(format!("{}/api/v1/auth/logout", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .client
        .get(format!("{}/api/v1/cards", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    app.cleanup();
}

#[actix_rt::test]
async fn session_endpoint_reports_the_live_session() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let response = app
        .client
        .get(format!("{}/api/v1/auth/session", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("startedAt").is_some());
    app.cleanup();
}

#[actix_rt::test]
async fn home_and_health_are_public() {
    let app = TestApp::spawn().await;

    let home = app.client.get(&app.address).send().await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);

    let health = app
        .client
        .get(format!("{}/api/v1/system/health", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["persistence"], "snapshot");
    app.cleanup();
}
