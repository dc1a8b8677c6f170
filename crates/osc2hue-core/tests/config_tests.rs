use osc2hue_core::{AppConfig, ConfigError, HueSettings, LogConfig, OscConfig};

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = AppConfig {
        osc: OscConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        },
        hue: HueSettings {
            bridge_ip: "192.168.1.100".to_string(),
            api_key: "test-api-key".to_string(),
        },
        logging: LogConfig::default(),
    };

    config.save(&path).expect("Failed to save config");
    let loaded = AppConfig::load(&path).expect("Failed to load config");
    assert_eq!(config, loaded);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"bridge_ip\": \"192.168.1.100\""));
}

#[test]
fn test_load_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let (config, err) = AppConfig::load_or_default(dir.path().join("missing.json"));
    assert_eq!(config, AppConfig::default());
    assert!(matches!(err, Some(ConfigError::Io(_))));
}

#[test]
fn test_load_invalid_json_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let (config, err) = AppConfig::load_or_default(&path);
    assert_eq!(config, AppConfig::default());
    assert!(matches!(err, Some(ConfigError::Json(_))));
}
