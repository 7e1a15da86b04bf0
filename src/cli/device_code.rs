use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error, info, management::DeviceSecretsStore, qiagen, success, types::RunContext,
    utils, warning,
};

pub async fn device_code(client_id: String, run: &RunContext) {
    let pkce = utils::generate_pkce_pair();

    let pb = ProgressBar::new_spinner();
    pb.set_message("Requesting device authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let authorization = match qiagen::auth::request_device_code(&client_id, &pkce.challenge).await
    {
        Ok(authorization) => authorization,
        Err(e) => {
            pb.finish_and_clear();
            error!(
                "Device authorization failed: {}",
                utils::mask_secrets(&e.to_string())
            );
        }
    };
    pb.finish_and_clear();

    // The verifier and device code stay in files; only the user code is shown.
    let store = DeviceSecretsStore::new(config::output_dir(), run);
    let saved = match store.persist(&pkce.verifier, &authorization).await {
        Ok(saved) => saved,
        Err(e) => {
            error!("Cannot persist device secrets: {}", e);
        }
    };

    success!("Device authorization received.");
    info!("User code: {}", authorization.user_code);
    if let Some(expires_in) = authorization.expires_in {
        info!("The user code expires in {} seconds.", expires_in);
    }
    info!("Code verifier saved to {}", saved.code_verifier.display());
    info!("User code saved to {}", saved.user_code.display());
    info!("Device code saved to {}", saved.device_code.display());

    match authorization.verification_uri {
        Some(uri) => {
            info!("Enter the user code on the verification page to register this device.");
            if webbrowser::open(&uri).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    uri
                )
            }
        }
        None => {
            info!("Enter the user code on the QiaOAuth device registration page.");
        }
    }
}
