// ── Runtime configuration ──
//
// These types describe what the bridge needs at runtime: portal
// credentials, broker parameters, and the door registry. They carry
// credential data but never touch disk -- aptus-config loads the secrets
// file and hands a validated `BridgeConfig` in. Immutable after load.

use secrecy::SecretString;

/// Credentials for the resident portal's login form.
#[derive(Debug, Clone)]
pub struct PortalCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Connection parameters for the MQTT broker.
#[derive(Debug, Clone)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

/// One physical door from the registry.
///
/// `id` doubles as a message-bus topic segment and as the path segment of
/// the unlock request, so it must be unique and stable for the process
/// lifetime -- aptus-config rejects registries that violate this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
}

/// Immutable configuration for the whole bridge process.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub portal: PortalCredentials,
    pub mqtt: MqttSettings,
    pub doors: Vec<Door>,
}

impl BridgeConfig {
    /// Look up a door by its registry id.
    pub fn door_by_id(&self, id: &str) -> Option<&Door> {
        self.doors.iter().find(|door| door.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BridgeConfig {
        BridgeConfig {
            portal: PortalCredentials {
                username: "resident".into(),
                password: SecretString::from("pw".to_owned()),
            },
            mqtt: MqttSettings {
                host: "broker.local".into(),
                port: 1883,
                username: "bridge".into(),
                password: SecretString::from("pw".to_owned()),
            },
            doors: vec![
                Door {
                    id: "A1".into(),
                    name: "Front Door".into(),
                    icon: None,
                },
                Door {
                    id: "B2".into(),
                    name: "Garage".into(),
                    icon: Some("mdi:garage".into()),
                },
            ],
        }
    }

    #[test]
    fn door_lookup_by_id() {
        let config = sample();
        assert_eq!(config.door_by_id("B2").map(|d| d.name.as_str()), Some("Garage"));
        assert!(config.door_by_id("C3").is_none());
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("pw\""));
        assert!(rendered.contains("resident"));
    }
}
