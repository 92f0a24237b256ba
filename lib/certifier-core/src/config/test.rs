use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;

use super::ConfigValidationError;
use super::core_config::{AppConfig, InputFormat, NoCustomConfig};

const BASE_CONFIG: &str = r#"
core:
  renderer:
    command: node
    args: ["render.js"]
  storage:
    bucket: certificates
    backendBaseUrl: https://api.example.com
  qrCode:
    verificationUrl: https://verify.example.com/{id}
  signature:
    encryptionKey: "0707070707070707070707070707070707070707070707070707070707070707"
  mail:
    relayUrl: https://mail.example.com/send
"#;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestAppConfig {
    database_url: String,
}

#[test]
fn test_parse_defaults() {
    let config = AppConfig::<NoCustomConfig>::from_yaml([BASE_CONFIG]).unwrap();

    assert_eq!(config.core.renderer.command, "node");
    assert_eq!(config.core.renderer.args, vec!["render.js"]);
    assert_eq!(config.core.renderer.batch_timeout, Duration::from_secs(300));
    assert_eq!(config.core.renderer.thumbnail_timeout, Duration::from_secs(30));
    assert_eq!(config.core.qr_code.size, 256);
    assert_eq!(config.core.qr_code.workers, None);
    assert_eq!(config.core.distribution.concurrency, 10);
    assert!(config.core.notification.webhook_url.is_none());
    assert!(config.core.pdf.signing_key.is_none());
    assert_eq!(
        config.core.storage.backend_base_url.as_str(),
        "https://api.example.com/"
    );
}

#[test]
fn test_later_inputs_override_earlier() {
    let overrides = r#"
core:
  renderer:
    batchTimeout: 42
  distribution:
    concurrency: 3
app:
  databaseUrl: "sqlite::memory:"
"#;

    let config = AppConfig::<TestAppConfig>::parse([
        InputFormat::yaml_str(BASE_CONFIG),
        InputFormat::yaml_str(overrides),
    ])
    .unwrap();

    assert_eq!(config.core.renderer.command, "node");
    assert_eq!(config.core.renderer.batch_timeout, Duration::from_secs(42));
    assert_eq!(config.core.distribution.concurrency, 3);
    assert_eq!(config.app.database_url, "sqlite::memory:");
}

#[test]
fn test_missing_required_section_fails() {
    let result = AppConfig::<NoCustomConfig>::from_yaml(["core:\n  renderer:\n    command: x\n"]);
    assert!(result.is_err());
}

#[test]
fn test_unsupported_file_extension() {
    let result = AppConfig::<NoCustomConfig>::from_files(&["config.toml"]);
    assert!(result.is_err());
}

#[test]
fn test_encryption_key_decoding() {
    let config = AppConfig::<NoCustomConfig>::from_yaml([BASE_CONFIG]).unwrap();
    let key = config.core.signature.encryption_key().unwrap();
    assert_eq!(key.expose_secret(), &[7u8; 32]);
}

#[test]
fn test_encryption_key_wrong_length() {
    let config = AppConfig::<NoCustomConfig>::from_yaml([
        BASE_CONFIG,
        "core:\n  signature:\n    encryptionKey: \"0707\"\n",
    ])
    .unwrap();

    assert!(matches!(
        config.core.signature.encryption_key(),
        Err(ConfigValidationError::InvalidKey { .. })
    ));
}

#[test]
fn test_signing_key_not_hex() {
    let config = AppConfig::<NoCustomConfig>::from_yaml([
        BASE_CONFIG,
        "core:\n  pdf:\n    signingKey: not-hex\n",
    ])
    .unwrap();

    assert!(config.core.pdf.signing_key().is_err());
}
