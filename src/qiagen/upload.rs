use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    multipart::{Form, Part},
};

use crate::{config, qiagen, qiagen::ApiError, types::SampleUploadResponse};

/// Uploads an assembled sample archive to QCI Interpret.
///
/// Posts the archive bytes as multipart form data to the sample endpoint.
/// The archive travels in a single part named `file` with an
/// `application/zip` content type.
///
/// # Arguments
///
/// * `access_token` - Access token obtained from the device token exchange
/// * `file_name` - File name reported for the multipart part, `{sample}.zip`
/// * `archive` - Raw bytes of the assembled ZIP archive
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(SampleUploadResponse)` - Optional results URL for the accepted sample
/// - `Err(ApiError)` - Transport failure, API error body, or unexpected status
///
/// # Authentication
///
/// QCI Interpret deviates from the usual bearer scheme: the `Authorization`
/// header carries the bare access token with no `Bearer` prefix. Sending a
/// prefixed token is rejected as unauthorized.
///
/// # Response Handling
///
/// Accepted samples usually answer with a JSON body containing a
/// `results-url` field pointing at the interpretation workflow. Some
/// deployments answer an empty 2xx body instead; that still counts as an
/// accepted upload, just without a link to report.
///
/// # Example
///
/// ```
/// let archive = async_fs::read(&archive_path).await?;
/// let response = upload_sample(&token, "S1.zip", archive).await?;
/// if let Some(url) = response.results_url {
///     println!("Results: {}", url);
/// }
/// ```
pub async fn upload_sample(
    access_token: &str,
    file_name: &str,
    archive: Vec<u8>,
) -> Result<SampleUploadResponse, ApiError> {
    let part = Part::bytes(archive)
        .file_name(file_name.to_string())
        .mime_str("application/zip")?;
    let form = Form::new().part("file", part);

    let client = qiagen::client()?;
    // Bare token value; the endpoint rejects an Authorization scheme prefix.
    let response = client
        .post(&config::sample_upload_url())
        .header(AUTHORIZATION, access_token)
        .header(ACCEPT, "application/json")
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if status.is_success() && body.trim().is_empty() {
        return Ok(SampleUploadResponse::default());
    }

    qiagen::decode_response(status, &body)
}
