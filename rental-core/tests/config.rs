use rental_core::config::{ConfigError, ConfigValue, RentalConfig};
use serial_test::serial;

#[test]
fn empty_config() {
    let config = RentalConfig::empty();
    assert!(config.get::<String>("nonexistent").is_err());
    assert_eq!(config.profile(), "test");
}

#[test]
fn set_and_get() {
    let mut config = RentalConfig::empty();
    config.set("server.addr", ConfigValue::String("127.0.0.1:9000".into()));
    assert_eq!(config.get::<String>("server.addr").unwrap(), "127.0.0.1:9000");
    assert!(config.contains_key("server.addr"));
}

#[test]
fn get_or_default() {
    let config = RentalConfig::empty();
    assert_eq!(config.get_or("database.connections", 5u32), 5);
}

#[test]
fn type_conversions() {
    let mut config = RentalConfig::empty();
    config.set("int_val", ConfigValue::Integer(42));
    config.set("float_val", ConfigValue::Float(2.5));
    config.set("bool_val", ConfigValue::String("yes".into()));
    config.set("null_val", ConfigValue::Null);

    assert_eq!(config.get::<i64>("int_val").unwrap(), 42);
    assert_eq!(config.get::<u32>("int_val").unwrap(), 42);
    assert_eq!(config.get::<f64>("float_val").unwrap(), 2.5);
    assert!(config.get::<bool>("bool_val").unwrap());
    assert_eq!(config.get::<String>("int_val").unwrap(), "42");
    assert!(config.get::<Option<String>>("null_val").unwrap().is_none());
}

#[test]
fn negative_value_is_not_u32() {
    let mut config = RentalConfig::empty();
    config.set("database.connections", ConfigValue::Integer(-1));
    let err = config.get::<u32>("database.connections").unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { expected: "u32", .. }));
}

#[test]
fn flatten_yaml() {
    let yaml = r#"
database:
  url: "sqlite::memory:"
  connections: 4
security:
  header:
    principal: x-authenticated-user
"#;
    let config = RentalConfig::from_yaml_str(yaml, "test").unwrap();

    assert_eq!(config.get::<String>("database.url").unwrap(), "sqlite::memory:");
    assert_eq!(config.get::<u32>("database.connections").unwrap(), 4);
    assert_eq!(
        config.get::<String>("security.header.principal").unwrap(),
        "x-authenticated-user"
    );
}

#[test]
fn list_from_yaml_and_from_string() {
    let yaml = r#"
security:
  roles: [USER, MANAGER]
"#;
    let mut config = RentalConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(
        config.get::<Vec<String>>("security.roles").unwrap(),
        vec!["USER", "MANAGER"]
    );

    config.set("security.roles", ConfigValue::String("ADMIN, USER".into()));
    assert_eq!(
        config.get::<Vec<String>>("security.roles").unwrap(),
        vec!["ADMIN", "USER"]
    );
}

#[test]
fn type_mismatch_reports_key() {
    let mut config = RentalConfig::empty();
    config.set("server.port", ConfigValue::String("not-a-number".into()));
    match config.get::<i64>("server.port") {
        Err(ConfigError::TypeMismatch { key, expected }) => {
            assert_eq!(key, "server.port");
            assert_eq!(expected, "i64");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn invalid_yaml_is_load_error() {
    let err = RentalConfig::from_yaml_str("database: [unclosed", "test").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
#[serial]
fn profile_file_overrides_base() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "server:\n  addr: 0.0.0.0:8080\ndatabase:\n  url: sqlite://base.db\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-prod.yaml"),
        "database:\n  url: sqlite://prod.db\n",
    )
    .unwrap();

    std::env::remove_var("RENTAL_PROFILE");
    std::env::remove_var("DATABASE_URL");
    let config = RentalConfig::load_from_dir(dir.path(), "prod").unwrap();

    assert_eq!(config.profile(), "prod");
    assert_eq!(config.get::<String>("server.addr").unwrap(), "0.0.0.0:8080");
    assert_eq!(config.get::<String>("database.url").unwrap(), "sqlite://prod.db");
}

#[test]
#[serial]
fn env_var_overrides_yaml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "database:\n  url: sqlite://base.db\n",
    )
    .unwrap();

    std::env::remove_var("RENTAL_PROFILE");
    std::env::set_var("DATABASE_URL", "sqlite://from-env.db");
    let config = RentalConfig::load_from_dir(dir.path(), "dev").unwrap();
    std::env::remove_var("DATABASE_URL");

    assert_eq!(config.get::<String>("database.url").unwrap(), "sqlite://from-env.db");
}

#[test]
#[serial]
fn missing_files_yield_env_only_config() {
    let dir = tempfile::tempdir().unwrap();
    std::env::remove_var("RENTAL_PROFILE");
    let config = RentalConfig::load_from_dir(dir.path(), "dev").unwrap();
    assert_eq!(config.profile(), "dev");
    assert!(!config.contains_key("server.addr"));
}
