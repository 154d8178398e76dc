use super::*;

use serial_test::serial;

fn clear_env() {
    unsafe {
        env::remove_var(Config::ENV_PORT);
        env::remove_var(Config::ENV_BIND_ADDR);
        env::remove_var(Config::ENV_REFERENCE_DIR);
        env::remove_var(Config::ENV_MODEL_PATH);
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.port, 8000);
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1");
    assert_eq!(config.reference_dir, PathBuf::from("./data/real"));
    assert!(config.model_path.is_none());
}

#[test]
fn test_socket_addr_format() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8000");
}

#[test]
#[serial]
fn test_from_env_defaults_when_unset() {
    clear_env();

    let config = Config::from_env().expect("defaults should parse");
    assert_eq!(config.port, 8000);
    assert!(config.model_path.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    unsafe {
        env::set_var(Config::ENV_PORT, "9100");
        env::set_var(Config::ENV_BIND_ADDR, "0.0.0.0");
        env::set_var(Config::ENV_REFERENCE_DIR, "/srv/references");
    }

    let config = Config::from_env().expect("env should parse");
    assert_eq!(config.port, 9100);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0");
    assert_eq!(config.reference_dir, PathBuf::from("/srv/references"));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_env();
    unsafe {
        env::set_var(Config::ENV_PORT, "not-a-port");
    }

    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_zero_port_rejected() {
    clear_env();
    unsafe {
        env::set_var(Config::ENV_PORT, "0");
    }

    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_env();
    unsafe {
        env::set_var(Config::ENV_BIND_ADDR, "not.an.ip");
    }

    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_blank_model_path_ignored() {
    clear_env();
    unsafe {
        env::set_var(Config::ENV_MODEL_PATH, "   ");
    }

    let config = Config::from_env().expect("env should parse");
    assert!(config.model_path.is_none());

    clear_env();
}

#[test]
fn test_validate_missing_model_path() {
    let config = Config {
        model_path: Some(PathBuf::from("/nonexistent/vgg16.safetensors")),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_model_path_must_be_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        model_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotAFile { .. })
    ));
}

#[test]
fn test_validate_reference_dir_must_be_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("not_a_dir");
    std::fs::write(&file_path, b"x").expect("write");

    let config = Config {
        reference_dir: file_path,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_accepts_absent_reference_dir() {
    // The directory is allowed to appear later; per-request checks report it.
    let config = Config {
        reference_dir: PathBuf::from("/nonexistent/references"),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}
