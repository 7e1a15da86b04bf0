use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use qciup::utils::*;
use sha2::{Digest, Sha256};

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be the base64url digest of the verifier, without padding
    let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
    assert_eq!(challenge, expected);
    assert!(!challenge.contains('='));

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should only use the URL-safe alphabet
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_pkce_pair() {
    let pair = generate_pkce_pair();

    // Challenge must belong to the verifier it is paired with
    assert_eq!(pair.verifier.len(), 128);
    assert_eq!(pair.challenge, generate_code_challenge(&pair.verifier));
}

#[test]
fn test_encode_client_credentials_round_trip() {
    let encoded = encode_client_credentials("my-client", "my-secret");

    // Decoding yields the original colon-joined pair
    let decoded = STANDARD.decode(&encoded).unwrap();
    assert_eq!(decoded, b"my-client:my-secret");

    // Standard alphabet keeps padding
    let padded = encode_client_credentials("abc", "defg");
    assert!(padded.ends_with('='));
}

#[test]
fn test_mask_secrets_authorization_header() {
    let masked = mask_secrets("Authorization: Basic c2VjcmV0");

    // The credential is gone, scheme included
    assert!(!masked.contains("c2VjcmV0"));
    assert!(!masked.contains("Basic c2VjcmV0"));
    assert!(masked.contains("<masked>"));
}

#[test]
fn test_mask_secrets_bearer_scheme() {
    let masked = mask_secrets("sent Bearer abc.def-123 to the server");
    assert_eq!(masked, "sent Bearer <masked> to the server");
}

#[test]
fn test_mask_secrets_form_fields() {
    let masked = mask_secrets("grant_type=device_code&device_code=dev-123&code_verifier=abc123");

    // Values are masked, field names and the grant type value survive
    assert_eq!(
        masked,
        "grant_type=device_code&device_code=<masked>&code_verifier=<masked>"
    );
}

#[test]
fn test_mask_secrets_json_fields() {
    let masked = mask_secrets(r#"{"client_id": "abc", "code_challenge": "xyz"}"#);
    assert!(!masked.contains("abc"));
    assert!(!masked.contains("xyz"));

    // camelCase spellings are covered as well
    let masked = mask_secrets(r#"{"deviceCode":"device-123"}"#);
    assert!(!masked.contains("device-123"));
}

#[test]
fn test_mask_secrets_keeps_challenge_method() {
    let masked = mask_secrets(r#"{"code_challenge": "abc", "code_challenge_method": "S256"}"#);

    // The method is not a secret
    assert!(masked.contains("S256"));
    assert!(!masked.contains("abc"));
}

#[test]
fn test_mask_secrets_leaves_artifact_paths() {
    // File names derived from secret kinds carry no secret values
    let line = "Code verifier saved to outputs/qciup_code_verifier_20250101_000000";
    assert_eq!(mask_secrets(line), line);
}

#[test]
fn test_mask_secrets_idempotent() {
    let once = mask_secrets("device_code=dev-123&code_verifier=abc");
    let twice = mask_secrets(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_parse_existing_file() {
    // An existing file parses to its path
    let file = tempfile::NamedTempFile::new().unwrap();
    let parsed = parse_existing_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(parsed, file.path());

    // A missing file is rejected with a readable message
    let missing = parse_existing_file("definitely/not/a/file.zip");
    assert!(missing.is_err());
    assert!(missing.unwrap_err().contains("does not exist"));
}
