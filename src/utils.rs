use std::path::PathBuf;

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::types::PkcePair;

// Masking runs in order; the Authorization rule goes first so a credential
// inside an Authorization line is masked whole, scheme included.
const MASK_RULES: [(&str, &str); 3] = [
    (
        r#"(?i)(Authorization["']?\s*[:=]\s*["']?)[^\r\n"']+"#,
        "${1}<masked>",
    ),
    (r"\b(Basic|Bearer)\s+[A-Za-z0-9+/=._~-]+", "${1} <masked>"),
    (
        r#"((?:device_code|deviceCode|code_verifier|codeVerifier|client_id|clientId|code_challenge|codeChallenge)["']?\s*[:=]\s*["']?)[^&\s"',}]+"#,
        "${1}<masked>",
    ),
];

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_pkce_pair() -> PkcePair {
    let verifier = generate_code_verifier();
    let challenge = generate_code_challenge(&verifier);
    PkcePair {
        verifier,
        challenge,
    }
}

pub fn encode_client_credentials(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{}:{}", client_id, client_secret))
}

pub fn mask_secrets(text: &str) -> String {
    let mut masked = text.to_string();
    for (pattern, replacement) in MASK_RULES {
        if let Ok(re) = Regex::new(pattern) {
            masked = re.replace_all(&masked, replacement).to_string();
        }
    }
    masked
}

pub fn parse_existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file '{}' does not exist", value))
    }
}
