//! File and environment loading.

use std::io::Write;

use tollway_config::{ConfigError, ConfigLoader, LogFormat};

fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_toml_file() {
    let file = write_file(
        ".toml",
        r#"
            [app]
            title = "Items API"
            max_body_bytes = 4096

            [logging]
            level = "warn"
            format = "pretty"

            [metrics]
            enabled = false
        "#,
    );

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();

    assert_eq!(config.app.title, "Items API");
    assert_eq!(config.app.max_body_bytes, 4096);
    assert!(config.app.validate_responses);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(!config.metrics.enabled);
}

#[test]
fn test_json_file_over_toml_file() {
    let toml = write_file(".toml", "[app]\ntitle = \"From TOML\"\nmax_body_bytes = 10\n");
    let json = write_file(".json", r#"{"app": {"max_body_bytes": 20}}"#);

    let config = ConfigLoader::new()
        .with_file(toml.path())
        .unwrap()
        .with_file(json.path())
        .unwrap()
        .load()
        .unwrap();

    assert_eq!(config.app.title, "From TOML");
    assert_eq!(config.app.max_body_bytes, 20);
}

#[test]
fn test_unknown_extension() {
    let file = write_file(".yaml", "app: {}\n");
    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
}

#[test]
fn test_env_overrides_from_dotenv_file() {
    let dotenv = write_file(
        ".env",
        "TOLLWAY_LOADING_TEST__APP__TITLE=\"From Env\"\nTOLLWAY_LOADING_TEST__LOGGING__FORMAT=pretty\n",
    );
    let file = write_file(".toml", "[app]\ntitle = \"From File\"\n");

    let config = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .with_env_prefix("tollway_loading_test")
        .with_dotenv_file(dotenv.path())
        .unwrap()
        .load()
        .unwrap();

    assert_eq!(config.app.title, "From Env");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_missing_dotenv_file() {
    let result = ConfigLoader::new().with_dotenv_file("/nonexistent/.env");
    assert!(matches!(result, Err(ConfigError::DotenvError(_))));
}
