use reqwest::header::AUTHORIZATION;

use crate::{
    config, qiagen,
    qiagen::ApiError,
    types::{DeviceAuthorization, DeviceCodeRequest, DeviceCodeResponse, TokenResponse},
};

/// Grant type identifier for the OAuth 2.0 device authorization grant.
pub const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Requests a device code from the QiaOAuth authorization server.
///
/// Posts the client ID together with a PKCE code challenge to the device
/// authorization endpoint. The server responds with a short user code for the
/// operator and a device code that can later be exchanged for an access token
/// once the operator has approved the device.
///
/// # Arguments
///
/// * `client_id` - OAuth client ID issued for this integration
/// * `code_challenge` - Base64url-encoded SHA256 digest of the code verifier
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(DeviceAuthorization)` - User code, device code, and optional
///   verification URI and expiry reported by the server
/// - `Err(ApiError)` - Transport failure, API error body, unexpected status,
///   or a response missing one of the required codes
///
/// # PKCE Security
///
/// Only the challenge crosses the wire here. The verifier stays on this
/// machine until the token exchange, which proves that the client completing
/// the flow is the one that started it.
///
/// # Wire Format
///
/// The request body is JSON:
///
/// ```json
/// {
///   "client_id": "...",
///   "code_challenge": "...",
///   "code_challenge_method": "S256"
/// }
/// ```
///
/// and the response carries camelCase fields (`userCode`, `deviceCode`,
/// `verificationUri`, `expiresIn`). Both codes are required; a response
/// without either is rejected as malformed.
///
/// # Example
///
/// ```
/// let pair = utils::generate_pkce_pair();
/// let authorization = request_device_code("my-client", &pair.challenge).await?;
/// println!("Enter code: {}", authorization.user_code);
/// ```
pub async fn request_device_code(
    client_id: &str,
    code_challenge: &str,
) -> Result<DeviceAuthorization, ApiError> {
    let client = qiagen::client()?;
    let request = DeviceCodeRequest {
        client_id: client_id.to_string(),
        code_challenge: code_challenge.to_string(),
        code_challenge_method: "S256".to_string(),
    };

    let response = client
        .post(&config::device_code_url())
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    let decoded: DeviceCodeResponse = qiagen::decode_response(status, &body)?;

    let user_code = decoded.user_code.ok_or(ApiError::MissingField("userCode"))?;
    let device_code = decoded
        .device_code
        .ok_or(ApiError::MissingField("deviceCode"))?;

    Ok(DeviceAuthorization {
        user_code,
        device_code,
        verification_uri: decoded.verification_uri,
        expires_in: decoded.expires_in,
    })
}

/// Exchanges an authorized device code for an access token.
///
/// Completes the device authorization grant by posting the persisted device
/// code together with the PKCE code verifier to the token endpoint. The
/// request authenticates with HTTP Basic using the client credentials.
///
/// # Arguments
///
/// * `credentials` - Base64-encoded `client_id:client_secret` pair
/// * `device_code` - Device code persisted by the device-code command
/// * `code_verifier` - PKCE code verifier persisted by the device-code command
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(String)` - The access token for the upload request
/// - `Err(ApiError)` - Transport failure, API error body such as
///   `authorization_pending` or `invalid_grant`, unexpected status, or a
///   response without an `access_token` field
///
/// # Error Conditions
///
/// Common failures include:
/// - The operator has not entered the user code yet (`authorization_pending`)
/// - The device code has expired or was already used (`invalid_grant`)
/// - Wrong client credentials behind the Basic header
///
/// # Example
///
/// ```
/// let credentials = utils::encode_client_credentials("my-client", "my-secret");
/// let token = exchange_device_token(&credentials, &device_code, &verifier).await?;
/// ```
pub async fn exchange_device_token(
    credentials: &str,
    device_code: &str,
    code_verifier: &str,
) -> Result<String, ApiError> {
    let client = qiagen::client()?;
    let response = client
        .post(&config::token_url())
        .header(AUTHORIZATION, format!("Basic {}", credentials))
        .form(&[
            ("grant_type", DEVICE_GRANT_TYPE),
            ("device_code", device_code),
            ("code_verifier", code_verifier),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    let decoded: TokenResponse = qiagen::decode_response(status, &body)?;

    decoded
        .access_token
        .ok_or(ApiError::MissingField("access_token"))
}
