mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in ["/api/sessions", "/api/schools", "/api/admissions", "/api/enrollments"] {
        let res = client.get(format!("{}{}", server.base_url, path)).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "expected 401 for {}", path);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/sessions", server.base_url))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_a_token_too() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/admin/tenants", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_rejects_malformed_payloads() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Missing required fields fails deserialization before any database work
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&serde_json::json!({ "tenant": "north-district" }))
        .send()
        .await?;
    assert!(res.status().is_client_error(), "unexpected status: {}", res.status());

    // Non-JSON body is rejected as well
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .body("not json")
        .send()
        .await?;
    assert!(res.status().is_client_error(), "unexpected status: {}", res.status());
    Ok(())
}
