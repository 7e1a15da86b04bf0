//! # QIAGEN Integration Module
//!
//! This module provides the interface to the QiaOAuth authorization server and
//! the QCI Interpret API. It serves as the integration layer between qciup and
//! QIAGEN's services, handling all HTTP communication, the device authorization
//! flow, error handling, and response decoding.
//!
//! ## Overview
//!
//! The QIAGEN module implements the two API interactions this tool needs: the
//! OAuth 2.0 device authorization grant for headless machines and the multipart
//! sample upload into QCI Interpret. It abstracts away the wire details and
//! inconsistencies between the two services, providing a clean Rust interface
//! for the CLI layer.
//!
//! ## Architecture
//!
//! The module follows a feature-based organization where each submodule handles
//! a specific domain of QIAGEN API functionality:
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! QIAGEN Integration Layer
//!     ├── Authorization (OAuth 2.0 Device Grant + PKCE)
//!     └── Sample Upload (Multipart Archives)
//!          ↓
//! HTTP Layer (reqwest, JSON/form/multipart)
//!          ↓
//! QiaOAuth Server / QCI Interpret API
//! ```
//!
//! ## Core Modules
//!
//! ### Authorization Module
//!
//! [`auth`] - Implements the OAuth 2.0 device authorization grant:
//! - **Device Code Request**: Registers the device and obtains a user code
//! - **PKCE Security**: Pairs the grant with a SHA256 code challenge
//! - **Token Exchange**: Trades an authorized device code for an access token
//!
//! ### Upload Module
//!
//! [`upload`] - Handles sample archive submission:
//! - **Multipart Upload**: Posts the assembled ZIP as multipart form data
//! - **Result Links**: Surfaces the results URL returned for accepted samples
//!
//! ## Device Authorization Strategy
//!
//! QCI Interpret integrations typically run on pipeline machines without a
//! browser session, so the interactive authorization-code flow is not an
//! option. The device grant splits authorization in two:
//!
//! 1. **Device Registration**: The tool posts a code challenge and receives a
//!    short user code together with a long-lived device code
//! 2. **Operator Approval**: A human enters the user code on the QIAGEN
//!    verification page from any browser
//! 3. **Token Exchange**: The tool later proves possession of the original
//!    code verifier and exchanges the device code for an access token
//!
//! ## Error Handling
//!
//! Both services report failures in different shapes: an `error` object in an
//! otherwise valid JSON body, a bare non-2xx status with free-form text, or a
//! 2xx body that is missing an expected field. [`ApiError`] folds all of these
//! into one type so the CLI layer can present a single coherent message. The
//! `error` body probe runs first; QiaOAuth is known to return application
//! errors with a 200 status.
//!
//! ## Configuration Integration
//!
//! The module integrates with the application's configuration system for:
//! - **API Endpoints**: QiaOAuth and QCI Interpret URLs with production defaults
//! - **Timeouts**: A single request timeout applied to every call
//!
//! ## Security Considerations
//!
//! - **Single-Use Tokens**: Access tokens are used immediately and never persisted
//! - **HTTPS Only**: All API communication uses HTTPS
//! - **No Logged Secrets**: Callers mask credentials before printing errors

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{config, types::ApiErrorBody};

pub mod auth;
pub mod upload;

#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Protocol { status: StatusCode, body: String },
    Api { error: String, description: Option<String> },
    Decode(serde_json::Error),
    MissingField(&'static str),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "transport error: {}", e),
            ApiError::Protocol { status, body } => {
                write!(f, "unexpected status {}: {}", status, body)
            }
            ApiError::Api { error, description } => match description {
                Some(desc) => write!(f, "API error: {} ({})", error, desc),
                None => write!(f, "API error: {}", error),
            },
            ApiError::Decode(e) => write!(f, "cannot decode response: {}", e),
            ApiError::MissingField(field) => {
                write!(f, "response is missing required field '{}'", field)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Builds an HTTP client with the configured request timeout applied.
pub fn client() -> Result<Client, ApiError> {
    let client = Client::builder()
        .timeout(config::request_timeout())
        .build()?;
    Ok(client)
}

/// Decodes an API response body into the expected type.
///
/// The `error` field probe runs before the status check; QiaOAuth reports
/// application errors inside a JSON body, sometimes with a 200 status.
/// Responses without an error body but with a non-2xx status become
/// [`ApiError::Protocol`], and everything else is decoded as `T`.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if let Ok(err_body) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(error) = err_body.error {
            return Err(ApiError::Api {
                error,
                description: err_body.error_description,
            });
        }
    }

    if !status.is_success() {
        return Err(ApiError::Protocol {
            status,
            body: body.trim().to_string(),
        });
    }

    serde_json::from_str::<T>(body).map_err(ApiError::Decode)
}
