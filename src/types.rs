use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RunContext {
    pub started_at: DateTime<Utc>,
    pub run_id: String,
}

impl RunContext {
    pub fn new() -> Self {
        let started_at = Utc::now();
        let run_id = started_at.format("%Y%m%d_%H%M%S").to_string();
        RunContext { started_at, run_id }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        RunContext::new()
    }
}

#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

#[derive(Debug, Clone)]
pub struct DeviceAuthorization {
    pub user_code: String,
    pub device_code: String,
    pub verification_uri: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCodeRequest {
    pub client_id: String,
    pub code_challenge: String,
    pub code_challenge_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCodeResponse {
    #[serde(rename = "userCode")]
    pub user_code: Option<String>,
    #[serde(rename = "deviceCode")]
    pub device_code: Option<String>,
    #[serde(rename = "verificationUri")]
    pub verification_uri: Option<String>,
    #[serde(rename = "expiresIn")]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleUploadResponse {
    #[serde(rename = "results-url")]
    pub results_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
}
