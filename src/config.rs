//! Configuration management for the QCI Interpret upload tool.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including QIAGEN API endpoints, request timeouts, and local
//! artifact locations.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Production QIAGEN endpoints and application defaults

use dotenv;
use std::{env, path::PathBuf, time::Duration};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `qciup/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// A missing `.env` file is not an error; every configuration value has a
/// production default, so the tool works out of the box.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/qciup/.env`
/// - macOS: `~/Library/Application Support/qciup/.env`
/// - Windows: `%LOCALAPPDATA%/qciup/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded or absent,
/// or an error string if directory creation or file parsing fails.
///
/// # Example
///
/// ```
/// use qciup::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("qciup/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the QiaOAuth device authorization endpoint.
///
/// Retrieves the `QCI_DEVICE_CODE_URL` environment variable, falling back to
/// the production QIAGEN endpoint. This is where the device code request is
/// posted at the start of the device authorization flow.
///
/// # Example
///
/// ```
/// let url = device_code_url(); // "https://apps.qiagenbioinformatics.eu/qiaoauth/oauth/device/code"
/// ```
pub fn device_code_url() -> String {
    env::var("QCI_DEVICE_CODE_URL").unwrap_or_else(|_| {
        "https://apps.qiagenbioinformatics.eu/qiaoauth/oauth/device/code".to_string()
    })
}

/// Returns the QiaOAuth token endpoint.
///
/// Retrieves the `QCI_TOKEN_URL` environment variable, falling back to the
/// production QIAGEN endpoint. This is where a persisted device code is
/// exchanged for an access token once the operator has authorized the device.
///
/// # Example
///
/// ```
/// let url = token_url(); // "https://apps.qiagenbioinformatics.eu/qiaoauth/oauth/token"
/// ```
pub fn token_url() -> String {
    env::var("QCI_TOKEN_URL")
        .unwrap_or_else(|_| "https://apps.qiagenbioinformatics.eu/qiaoauth/oauth/token".to_string())
}

/// Returns the QCI Interpret sample upload endpoint.
///
/// Retrieves the `QCI_SAMPLE_UPLOAD_URL` environment variable, falling back
/// to the production QIAGEN endpoint. Sample archives are posted here as
/// multipart form data.
///
/// # Example
///
/// ```
/// let url = sample_upload_url(); // "https://api.qiagenbioinformatics.eu/v2/sample"
/// ```
pub fn sample_upload_url() -> String {
    env::var("QCI_SAMPLE_UPLOAD_URL")
        .unwrap_or_else(|_| "https://api.qiagenbioinformatics.eu/v2/sample".to_string())
}

/// Returns the timeout applied to every API request.
///
/// Retrieves the `QCI_REQUEST_TIMEOUT_SECS` environment variable and parses
/// it as a number of seconds. Values that are missing or unparsable fall
/// back to 60 seconds, which leaves enough room for sample archive uploads.
///
/// # Example
///
/// ```
/// let timeout = request_timeout(); // e.g., Duration::from_secs(60)
/// ```
pub fn request_timeout() -> Duration {
    let secs = env::var("QCI_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60);
    Duration::from_secs(secs)
}

/// Returns the directory where run artifacts are written.
///
/// Retrieves the `QCI_OUTPUT_DIR` environment variable which specifies where
/// device secret files, sample manifests, and assembled archives are placed.
/// Defaults to `outputs` relative to the working directory.
///
/// # Example
///
/// ```
/// let dir = output_dir(); // e.g., PathBuf::from("outputs")
/// ```
pub fn output_dir() -> PathBuf {
    env::var("QCI_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("outputs"))
}

/// Returns the path of the sample manifest template.
///
/// Retrieves the `QCI_TEMPLATE_PATH` environment variable which points at the
/// XML document used as the starting point for every generated sample
/// manifest. Defaults to `templates/sample_upload_template.xml` relative to
/// the working directory.
///
/// # Example
///
/// ```
/// let path = template_path(); // e.g., PathBuf::from("templates/sample_upload_template.xml")
/// ```
pub fn template_path() -> PathBuf {
    env::var("QCI_TEMPLATE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("templates/sample_upload_template.xml"))
}
