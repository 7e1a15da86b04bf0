use axum::{
    Json, Router,
    extract::Multipart,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};

use qciup::{
    qiagen::{ApiError, auth, upload},
    utils,
};

// Helper function to start an in-process stub for both QIAGEN services
async fn spawn_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/oauth/device/code", post(device_code_handler))
        .route("/oauth/device/code-missing", post(device_code_missing_handler))
        .route("/oauth/token", post(token_handler))
        .route("/oauth/token-invalid", post(token_invalid_handler))
        .route("/v2/sample", post(sample_handler))
        .route("/v2/sample-error", post(sample_error_handler))
        .route("/v2/sample-empty", post(sample_empty_handler));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn device_code_handler(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["client_id"], "test-client");
    assert_eq!(body["code_challenge"], "challenge-abc");
    assert_eq!(body["code_challenge_method"], "S256");
    Json(json!({
        "userCode": "ABCD-EFGH",
        "deviceCode": "device-123",
        "verificationUri": "https://verify.example",
        "expiresIn": 600
    }))
}

async fn device_code_missing_handler() -> Json<Value> {
    Json(json!({ "userCode": "ABCD-EFGH" }))
}

async fn token_handler(headers: HeaderMap, body: String) -> Json<Value> {
    let credentials = utils::encode_client_credentials("test-client", "test-secret");
    let authorization = headers.get("authorization").unwrap().to_str().unwrap();
    assert_eq!(authorization, format!("Basic {}", credentials));

    // Form-encoded device grant with the urn grant type percent-encoded
    assert!(body.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Adevice_code"));
    assert!(body.contains("device_code=device-123"));
    assert!(body.contains("code_verifier=verifier-xyz"));
    Json(json!({
        "access_token": "token-abc",
        "token_type": "bearer",
        "expires_in": 3600
    }))
}

async fn token_invalid_handler() -> Json<Value> {
    Json(json!({
        "error": "invalid_grant",
        "error_description": "Device code not authorized"
    }))
}

async fn sample_handler(headers: HeaderMap, mut multipart: Multipart) -> Json<Value> {
    // The sample endpoint takes the bare token, no scheme prefix
    let authorization = headers.get("authorization").unwrap().to_str().unwrap();
    assert_eq!(authorization, "token-abc");
    assert_eq!(
        headers.get("accept").unwrap().to_str().unwrap(),
        "application/json"
    );

    let field = multipart.next_field().await.unwrap().unwrap();
    assert_eq!(field.name().unwrap(), "file");
    assert_eq!(field.file_name().unwrap(), "S1.zip");
    assert_eq!(field.content_type().unwrap(), "application/zip");
    let bytes = field.bytes().await.unwrap();
    assert_eq!(&bytes[..], b"fake zip bytes");
    assert!(multipart.next_field().await.unwrap().is_none());

    Json(json!({ "results-url": "https://qci.example/results/1" }))
}

async fn sample_error_handler() -> Json<Value> {
    Json(json!({ "error": "Bad zip" }))
}

async fn sample_empty_handler() -> StatusCode {
    StatusCode::OK
}

#[tokio::test]
async fn test_wire_protocol_against_stub() {
    let base = spawn_stub().await;

    // Device code request returns both codes plus the optional extras
    unsafe { std::env::set_var("QCI_DEVICE_CODE_URL", format!("{}/oauth/device/code", base)) };
    let authorization = auth::request_device_code("test-client", "challenge-abc")
        .await
        .unwrap();
    assert_eq!(authorization.user_code, "ABCD-EFGH");
    assert_eq!(authorization.device_code, "device-123");
    assert_eq!(
        authorization.verification_uri.as_deref(),
        Some("https://verify.example")
    );
    assert_eq!(authorization.expires_in, Some(600));

    // A response without the device code is rejected as malformed
    unsafe {
        std::env::set_var(
            "QCI_DEVICE_CODE_URL",
            format!("{}/oauth/device/code-missing", base),
        )
    };
    match auth::request_device_code("test-client", "challenge-abc").await {
        Err(ApiError::MissingField(field)) => assert_eq!(field, "deviceCode"),
        other => panic!("expected a missing field error, got {:?}", other),
    }

    // Token exchange sends Basic credentials and the form-encoded grant
    unsafe { std::env::set_var("QCI_TOKEN_URL", format!("{}/oauth/token", base)) };
    let credentials = utils::encode_client_credentials("test-client", "test-secret");
    let token = auth::exchange_device_token(&credentials, "device-123", "verifier-xyz")
        .await
        .unwrap();
    assert_eq!(token, "token-abc");

    // An error body is surfaced even when the status is 200
    unsafe { std::env::set_var("QCI_TOKEN_URL", format!("{}/oauth/token-invalid", base)) };
    match auth::exchange_device_token(&credentials, "device-123", "verifier-xyz").await {
        Err(ApiError::Api { error, description }) => {
            assert_eq!(error, "invalid_grant");
            assert_eq!(description.as_deref(), Some("Device code not authorized"));
        }
        other => panic!("expected an API error, got {:?}", other),
    }

    // Accepted uploads report the results URL from the response body
    unsafe { std::env::set_var("QCI_SAMPLE_UPLOAD_URL", format!("{}/v2/sample", base)) };
    let response = upload::upload_sample("token-abc", "S1.zip", b"fake zip bytes".to_vec())
        .await
        .unwrap();
    assert_eq!(
        response.results_url.as_deref(),
        Some("https://qci.example/results/1")
    );

    // Upload rejections carry the error message from the body
    unsafe { std::env::set_var("QCI_SAMPLE_UPLOAD_URL", format!("{}/v2/sample-error", base)) };
    match upload::upload_sample("token-abc", "S1.zip", b"fake zip bytes".to_vec()).await {
        Err(ApiError::Api { error, .. }) => assert_eq!(error, "Bad zip"),
        other => panic!("expected an API error, got {:?}", other),
    }

    // An empty 2xx body still counts as an accepted upload
    unsafe { std::env::set_var("QCI_SAMPLE_UPLOAD_URL", format!("{}/v2/sample-empty", base)) };
    let response = upload::upload_sample("token-abc", "S1.zip", b"fake zip bytes".to_vec())
        .await
        .unwrap();
    assert!(response.results_url.is_none());
}
