use std::time::Duration;

use rental_core::{ConfigError, RentalConfig};
use rental_security::IdentityHeaders;

/// Typed view of the application keys in [`RentalConfig`].
#[derive(Clone, Debug)]
pub struct CrmSettings {
    pub addr: String,
    pub database_url: String,
    pub max_connections: u32,
    pub identity_headers: IdentityHeaders,
    pub session_ttl: Duration,
}

impl CrmSettings {
    /// Read the settings, falling back to defaults for anything unset except
    /// `database.url`, which must be configured.
    ///
    /// A key that is present with the wrong type is an error.
    pub fn from_config(config: &RentalConfig) -> Result<Self, ConfigError> {
        let defaults = IdentityHeaders::default();
        Ok(Self {
            addr: optional(config, "server.addr", "0.0.0.0:3000".to_string())?,
            database_url: config.get("database.url")?,
            max_connections: optional(config, "database.max-connections", 5)?,
            identity_headers: IdentityHeaders {
                principal: optional(config, "security.principal-header", defaults.principal)?,
                roles: optional(config, "security.roles-header", defaults.roles)?,
            },
            session_ttl: Duration::from_secs(
                optional(config, "security.session-ttl-secs", 1800u32)?.into(),
            ),
        })
    }
}

fn optional<V: rental_core::FromConfigValue>(
    config: &RentalConfig,
    key: &str,
    default: V,
) -> Result<V, ConfigError> {
    if config.contains_key(key) {
        config.get(key)
    } else {
        Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_unset_keys() {
        let config = RentalConfig::from_yaml_str("database:\n  url: \"sqlite://crm.db\"\n", "test").unwrap();
        let settings = CrmSettings::from_config(&config).unwrap();
        assert_eq!(settings.addr, "0.0.0.0:3000");
        assert_eq!(settings.database_url, "sqlite://crm.db");
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.identity_headers.principal, "x-authenticated-user");
        assert_eq!(settings.session_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn database_url_is_required() {
        match CrmSettings::from_config(&RentalConfig::empty()) {
            Err(ConfigError::NotFound(key)) => assert_eq!(key, "database.url"),
            other => panic!("expected a missing database.url, got {:?}", other.map(|s| s.database_url)),
        }
    }

    #[test]
    fn yaml_values_override_defaults() {
        let yaml = r#"
server:
  addr: "127.0.0.1:8080"
database:
  url: "sqlite::memory:"
  max-connections: 2
security:
  roles-header: "x-roles"
  session-ttl-secs: 60
"#;
        let config = RentalConfig::from_yaml_str(yaml, "test").unwrap();
        let settings = CrmSettings::from_config(&config).unwrap();
        assert_eq!(settings.addr, "127.0.0.1:8080");
        assert_eq!(settings.max_connections, 2);
        assert_eq!(settings.identity_headers.roles, "x-roles");
        assert_eq!(settings.identity_headers.principal, "x-authenticated-user");
        assert_eq!(settings.session_ttl, Duration::from_secs(60));
    }

    #[test]
    fn mistyped_value_is_rejected() {
        let config = RentalConfig::from_yaml_str("database:\n  url: \"sqlite::memory:\"\n  max-connections: many\n", "test").unwrap();
        assert!(matches!(
            CrmSettings::from_config(&config),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }
}
