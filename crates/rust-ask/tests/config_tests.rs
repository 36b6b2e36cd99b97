//! Integration tests for configuration loading.

use std::path::PathBuf;

use rust_ask::config::{ConfigFormat, EnvConfig};
use rust_ask::mock::MockReader;
use rust_ask::{AskConfig, AskError, Asker, LogFormat, StdioReader};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rust-ask-{}-{name}", std::process::id()))
}

#[test]
fn load_toml_file() {
    let path = temp_path("config.toml");
    std::fs::write(
        &path,
        "[reader]\nmax_line_length = 128\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
    )
    .unwrap();

    let config = AskConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.reader.max_line_length, 128);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn load_partial_json_file() {
    let path = temp_path("config.json");
    std::fs::write(&path, r#"{ "logging": { "format": "pretty" } }"#).unwrap();

    let config = AskConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.reader, AskConfig::default().reader);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn unknown_extension_is_rejected() {
    let err = AskConfig::from_file("settings.yaml").unwrap_err();
    assert!(matches!(err, AskError::Config { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = AskConfig::from_file(temp_path("missing.toml")).unwrap_err();
    assert!(matches!(err, AskError::Io { .. }));
}

#[test]
fn zero_line_length_is_invalid() {
    let err = AskConfig::parse("[reader]\nmax_line_length = 0\n", ConfigFormat::Toml).unwrap_err();
    assert!(err.to_string().contains("max_line_length"));
}

#[test]
fn toml_output_reloads() {
    let config = AskConfig::new().max_line_length(99);
    let text = config.to_toml_string().unwrap();
    assert_eq!(AskConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn environment_overlay() {
    let env = EnvConfig::new("ASK_TEST_OVERLAY")
        .with_var("max_line_length", "512")
        .with_var("log_level", "trace")
        .with_var("log_format", "PRETTY");

    let mut config = AskConfig::default();
    config.apply_env(&env).unwrap();
    assert_eq!(config.reader.max_line_length, 512);
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn environment_overlay_rejects_bad_values() {
    let mut config = AskConfig::default();
    let bad_number = EnvConfig::new("ASK_TEST_BAD").with_var("max_line_length", "lots");
    assert!(config.apply_env(&bad_number).is_err());

    let bad_format = EnvConfig::new("ASK_TEST_BAD").with_var("log_format", "xml");
    assert!(config.apply_env(&bad_format).is_err());
}

#[tokio::test]
async fn line_limit_reaches_the_stdio_reader() {
    let config = AskConfig::new().max_line_length(4);
    let input: &[u8] = b"toolong\n";
    let asker = Asker::with_opener(config, move |config: &AskConfig| {
        Ok(StdioReader::new(input, Vec::new(), &config.reader))
    });

    let err = asker.ask("? ").await.unwrap_err();
    assert!(matches!(err, AskError::LineTooLong { max: 4 }));
}

#[tokio::test]
async fn opener_receives_the_asker_config() {
    let mock = MockReader::with_lines(["x"]);
    let handed = mock.clone();
    let asker = Asker::with_opener(AskConfig::new().max_line_length(7), move |config: &AskConfig| {
        assert_eq!(config.reader.max_line_length, 7);
        Ok(handed.clone())
    });

    assert_eq!(asker.ask("? ").await.unwrap(), "x");
    assert_eq!(asker.config().reader.max_line_length, 7);
}
