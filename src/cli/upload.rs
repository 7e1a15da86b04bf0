use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error, info,
    management::{ArchiveAssembler, ManifestBuilder},
    qiagen, success,
    types::RunContext,
    utils, warning,
};

pub async fn upload(
    sample_name: String,
    sample_path: PathBuf,
    client_id: String,
    client_secret: String,
    code_verifier: String,
    device_code: String,
    run: &RunContext,
) {
    let outdir = config::output_dir();

    let builder = ManifestBuilder::new(&sample_name, config::template_path(), outdir.clone());
    let manifest = match builder.write().await {
        Ok(manifest) => manifest,
        Err(e) => {
            error!("Cannot build sample manifest: {}", e);
        }
    };
    info!("Manifest written to {}", manifest.display());

    let assembler = ArchiveAssembler::new(&sample_name, &sample_path, &outdir, run);
    let assembled = match assembler.assemble(&manifest).await {
        Ok(assembled) => assembled,
        Err(e) => {
            error!("Cannot assemble sample archive: {}", e);
        }
    };

    for name in &assembled.excluded {
        info!("Excluded {} from the sample archive.", name);
    }
    if assembled.included.len() == 1 {
        // only the manifest made it in
        warning!("No variant files matched in {}.", sample_path.display());
    }
    success!(
        "Assembled {} with {} files.",
        assembled.archive.display(),
        assembled.included.len()
    );

    let credentials = utils::encode_client_credentials(&client_id, &client_secret);

    let pb = spinner("Exchanging device code for an access token...");
    let token =
        match qiagen::auth::exchange_device_token(&credentials, &device_code, &code_verifier).await
        {
            Ok(token) => token,
            Err(e) => {
                pb.finish_and_clear();
                error!(
                    "Token exchange failed: {}",
                    utils::mask_secrets(&e.to_string())
                );
            }
        };
    pb.finish_and_clear();
    success!("Access token obtained.");

    let archive = match async_fs::read(&assembled.archive).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Cannot read {}: {}", assembled.archive.display(), e);
        }
    };

    let pb = spinner("Uploading sample archive to QCI Interpret...");
    let file_name = format!("{}.zip", sample_name);
    let response = match qiagen::upload::upload_sample(&token, &file_name, archive).await {
        Ok(response) => response,
        Err(e) => {
            pb.finish_and_clear();
            error!(
                "Sample upload failed: {}",
                utils::mask_secrets(&e.to_string())
            );
        }
    };
    pb.finish_and_clear();

    match response.results_url {
        Some(url) => success!("Upload accepted. Results will appear at {}", url),
        None => success!("Upload accepted."),
    }

    if let Err(e) = async_fs::remove_file(&assembled.archive).await {
        warning!("Cannot remove {}: {}", assembled.archive.display(), e);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
