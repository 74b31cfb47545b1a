//! Secrets-file loading for the aptus-open bridge.
//!
//! TOML schema (`[csb-login]`, `[mqtt]`, `[[doors]]`) with an `APTUS_`
//! environment overlay, validated and translated into
//! `aptus_core::BridgeConfig`. Loading failures are fatal at startup --
//! the bridge never runs on a partial configuration.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use aptus_core::{BridgeConfig, Door, MqttSettings, PortalCredentials};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("secrets file not found: {path}")]
    NotFound { path: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML schema ─────────────────────────────────────────────────────

/// Top-level secrets file.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(rename = "csb-login")]
    csb_login: PortalSection,
    mqtt: MqttSection,
    #[serde(default)]
    doors: Vec<DoorEntry>,
}

#[derive(Debug, Deserialize)]
struct PortalSection {
    username: String,
    password: SecretString,
}

#[derive(Debug, Deserialize)]
struct MqttSection {
    host: String,
    #[serde(default = "default_mqtt_port")]
    port: u16,
    username: String,
    password: SecretString,
}

fn default_mqtt_port() -> u16 {
    1883
}

#[derive(Debug, Deserialize)]
struct DoorEntry {
    id: String,
    name: String,
    icon: Option<String>,
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load and validate the secrets file at `path`.
///
/// Environment variables prefixed `APTUS_` override file values, e.g.
/// `APTUS_CSB_LOGIN_PASSWORD` and `APTUS_MQTT_PASSWORD`.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    let figment = Figment::new()
        .merge(Toml::file(path))
        .merge(env_overlay());

    let file: SecretsFile = figment.extract()?;
    file.into_bridge_config()
}

/// `APTUS_` env provider, mapped onto the file's section names.
///
/// The section separator becomes a dot so `split` can nest it:
/// `APTUS_CSB_LOGIN_PASSWORD` -> `csb-login.password`.
fn env_overlay() -> Env {
    Env::prefixed("APTUS_")
        .map(|key| {
            key.as_str()
                .to_ascii_lowercase()
                .replacen("csb_login_", "csb-login.", 1)
                .replacen("mqtt_", "mqtt.", 1)
                .into()
        })
        .split(".")
}

// ── Schema -> runtime conversion ────────────────────────────────────

impl SecretsFile {
    fn into_bridge_config(self) -> Result<BridgeConfig, ConfigError> {
        let doors: Vec<Door> = self
            .doors
            .into_iter()
            .map(|entry| Door {
                id: entry.id,
                name: entry.name,
                icon: entry.icon,
            })
            .collect();

        validate_doors(&doors)?;

        Ok(BridgeConfig {
            portal: PortalCredentials {
                username: self.csb_login.username,
                password: self.csb_login.password,
            },
            mqtt: MqttSettings {
                host: self.mqtt.host,
                port: self.mqtt.port,
                username: self.mqtt.username,
                password: self.mqtt.password,
            },
            doors,
        })
    }
}

/// Door ids end up in topic names and discovery unique-ids, so they must
/// be unique, non-empty, and free of MQTT topic syntax.
fn validate_doors(doors: &[Door]) -> Result<(), ConfigError> {
    let mut seen = std::collections::HashSet::new();
    for door in doors {
        if door.id.is_empty() {
            return Err(ConfigError::Validation {
                field: "doors".into(),
                reason: format!("door '{}' has an empty id", door.name),
            });
        }
        if door.id.contains(['/', '+', '#']) || door.id.contains(char::is_whitespace) {
            return Err(ConfigError::Validation {
                field: "doors".into(),
                reason: format!("door id '{}' contains topic syntax", door.id),
            });
        }
        if !seen.insert(door.id.as_str()) {
            return Err(ConfigError::Validation {
                field: "doors".into(),
                reason: format!("duplicate door id '{}'", door.id),
            });
        }
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::path::Path;

    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::{ConfigError, load_config};

    const SAMPLE: &str = r#"
        [csb-login]
        username = "resident@example.com"
        password = "portal-pw"

        [mqtt]
        host = "broker.local"
        username = "bridge"
        password = "mqtt-pw"

        [[doors]]
        id = "A1"
        name = "Front Door"

        [[doors]]
        id = "B2"
        name = "Garage"
        icon = "mdi:garage"
    "#;

    #[test]
    fn loads_full_config() {
        Jail::expect_with(|jail| {
            jail.create_file("secrets.toml", SAMPLE)?;

            let config = load_config(Path::new("secrets.toml")).unwrap();

            assert_eq!(config.portal.username, "resident@example.com");
            assert_eq!(config.portal.password.expose_secret(), "portal-pw");
            assert_eq!(config.mqtt.host, "broker.local");
            assert_eq!(config.mqtt.port, 1883, "default port applies");
            assert_eq!(config.doors.len(), 2);
            assert_eq!(config.doors[0].id, "A1");
            assert_eq!(config.doors[1].icon.as_deref(), Some("mdi:garage"));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_passwords() {
        Jail::expect_with(|jail| {
            jail.create_file("secrets.toml", SAMPLE)?;
            jail.set_env("APTUS_CSB_LOGIN_PASSWORD", "from-env");
            jail.set_env("APTUS_MQTT_PORT", "8883");

            let config = load_config(Path::new("secrets.toml")).unwrap();

            assert_eq!(config.portal.password.expose_secret(), "from-env");
            assert_eq!(config.mqtt.port, 8883);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_config(Path::new("/nonexistent/secrets.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn duplicate_door_ids_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "secrets.toml",
                r#"
                [csb-login]
                username = "u"
                password = "p"

                [mqtt]
                host = "h"
                username = "u"
                password = "p"

                [[doors]]
                id = "A1"
                name = "One"

                [[doors]]
                id = "A1"
                name = "Two"
            "#,
            )?;

            let err = load_config(Path::new("secrets.toml")).unwrap_err();
            match err {
                ConfigError::Validation { ref reason, .. } => {
                    assert!(reason.contains("duplicate door id 'A1'"), "got: {reason}");
                }
                other => panic!("expected Validation error, got: {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn topic_syntax_in_door_id_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "secrets.toml",
                r#"
                [csb-login]
                username = "u"
                password = "p"

                [mqtt]
                host = "h"
                username = "u"
                password = "p"

                [[doors]]
                id = "a/b"
                name = "Broken"
            "#,
            )?;

            let err = load_config(Path::new("secrets.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { .. }));
            Ok(())
        });
    }

    #[test]
    fn missing_mqtt_section_is_a_figment_error() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "secrets.toml",
                r#"
                [csb-login]
                username = "u"
                password = "p"
            "#,
            )?;

            let err = load_config(Path::new("secrets.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Figment(_)));
            Ok(())
        });
    }
}
