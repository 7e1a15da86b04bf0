use std::path::PathBuf;

use crate::types::{DeviceAuthorization, RunContext};

pub struct PersistedSecrets {
    pub code_verifier: PathBuf,
    pub user_code: PathBuf,
    pub device_code: PathBuf,
}

pub struct DeviceSecretsStore {
    outdir: PathBuf,
    run_id: String,
}

impl DeviceSecretsStore {
    pub fn new(outdir: PathBuf, run: &RunContext) -> Self {
        DeviceSecretsStore {
            outdir,
            run_id: run.run_id.clone(),
        }
    }

    pub async fn persist(
        &self,
        code_verifier: &str,
        authorization: &DeviceAuthorization,
    ) -> Result<PersistedSecrets, String> {
        async_fs::create_dir_all(&self.outdir)
            .await
            .map_err(|e| e.to_string())?;

        let paths = PersistedSecrets {
            code_verifier: self.secret_path("code_verifier"),
            user_code: self.secret_path("user_code"),
            device_code: self.secret_path("device_code"),
        };

        // Each file holds exactly the raw value, no trailing newline.
        async_fs::write(&paths.code_verifier, code_verifier)
            .await
            .map_err(|e| e.to_string())?;
        async_fs::write(&paths.user_code, &authorization.user_code)
            .await
            .map_err(|e| e.to_string())?;
        async_fs::write(&paths.device_code, &authorization.device_code)
            .await
            .map_err(|e| e.to_string())?;

        Ok(paths)
    }

    fn secret_path(&self, kind: &str) -> PathBuf {
        self.outdir.join(format!("qciup_{}_{}", kind, self.run_id))
    }
}
