use scalyr_log_forwarder::app::{Config, ConfigError};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
#[serial]
fn test_defaults_with_token() {
    let config =
        Config::from_args(["forwarder", "--api-write-token", "secret"]).unwrap();

    assert_eq!(config.endpoint, "https://www.scalyr.com/addEvents");
    assert_eq!(
        config.ssl_ca_bundle_path.to_str().unwrap(),
        "/etc/ssl/certs/ca-bundle.crt"
    );
    assert!(config.ssl_verify_peer);
    assert_eq!(config.ssl_verify_depth, 5);
    assert_eq!(config.workers, 1);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.source_label, "Forwarder");
    assert!(config.session_metadata.is_none());
}

#[test]
#[serial]
fn test_missing_token_fails_validation() {
    let result = Config::from_args(["forwarder"]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
#[serial]
fn test_more_than_one_worker_is_rejected() {
    let result = Config::from_args([
        "forwarder",
        "--api-write-token",
        "secret",
        "--workers",
        "4",
    ]);

    match result {
        Err(ConfigError::InvalidConfig(msg)) => {
            assert!(msg.contains("limited to 1"));
            assert!(msg.contains('4'));
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_malformed_endpoint_url_is_rejected() {
    let result = Config::from_args([
        "forwarder",
        "--api-write-token",
        "secret",
        "--endpoint",
        "not a url",
    ]);
    assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
}

#[test]
#[serial]
fn test_session_info_parses_into_metadata() {
    let config = Config::from_args([
        "forwarder",
        "--api-write-token",
        "secret",
        "--session-info",
        r#"{"env":"prod","dc":"eu-1"}"#,
    ])
    .unwrap();

    let metadata = config.session_metadata.unwrap();
    assert_eq!(metadata.get("env").map(String::as_str), Some("prod"));
    assert_eq!(metadata.get("dc").map(String::as_str), Some("eu-1"));
}

#[test]
#[serial]
fn test_invalid_session_info_is_rejected() {
    let result = Config::from_args([
        "forwarder",
        "--api-write-token",
        "secret",
        "--session-info",
        "not json",
    ]);
    assert!(matches!(result, Err(ConfigError::InvalidSessionInfo(_))));
}

#[test]
#[serial]
fn test_verify_peer_can_be_disabled() {
    let config = Config::from_args([
        "forwarder",
        "--api-write-token",
        "secret",
        "--ssl-verify-peer",
        "false",
    ])
    .unwrap();

    assert!(!config.ssl_verify_peer);
    assert!(!config.sender_config().verify_peer);
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    let result = Config::from_args([
        "forwarder",
        "--api-write-token",
        "secret",
        "--request-timeout-secs",
        "0",
    ]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
#[serial]
fn test_zero_verify_depth_is_rejected() {
    let result = Config::from_args([
        "forwarder",
        "--api-write-token",
        "secret",
        "--ssl-verify-depth",
        "0",
    ]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
#[serial]
fn test_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_write_token = "file-token"
endpoint = "https://agent.scalyr.com/addEvents"
ssl_verify_peer = false
source_label = "Edge"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.api_write_token, "file-token");
    assert_eq!(config.endpoint, "https://agent.scalyr.com/addEvents");
    assert!(!config.ssl_verify_peer);
    assert_eq!(config.source_label, "Edge");
    // Unset fields keep their defaults
    assert_eq!(config.ssl_verify_depth, 5);
}

#[test]
#[serial]
fn test_config_file_alone_supplies_token() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"api_write_token = "file-token""#).unwrap();

    // The file must be consulted before validation runs, so the token does
    // not need to be repeated on the command line
    let config = Config::from_args([
        "forwarder",
        "--config-file",
        file.path().to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(config.api_write_token, "file-token");
    assert_eq!(config.endpoint, "https://www.scalyr.com/addEvents");
}

#[test]
#[serial]
fn test_token_from_environment() {
    unsafe { std::env::set_var("SCALYR_API_WRITE_TOKEN", "env-token") };

    let config = Config::from_args(["forwarder"]).unwrap();
    assert_eq!(config.api_write_token, "env-token");

    unsafe { std::env::remove_var("SCALYR_API_WRITE_TOKEN") };
}
