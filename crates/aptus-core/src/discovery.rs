// ── Home Assistant device discovery payload ──
//
// One button (press to unlock) and one binary sensor (open indicator) per
// door, wrapped in a single device document. Built once at startup from
// the door registry and published retained on every (re)connect, so the
// hub's presentation state resets even when only the bridge restarted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Door;
use crate::topics;

/// Default icon for a door's unlock button.
const BUTTON_ICON: &str = "mdi:lock-open-variant";

/// Icon for the open/closed sensor.
const SENSOR_ICON: &str = "mdi:door";

/// Seconds after which the hub flips the sensor back to off on its own.
const SENSOR_OFF_DELAY: u32 = 5;

/// The retained discovery document for the whole bridge device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceDescriptor {
    pub dev: DeviceInfo,
    pub o: OriginInfo,
    pub command_topic: String,
    pub cmps: BTreeMap<String, Component>,
    pub qos: u8,
}

/// Device block (`dev`) of the discovery document.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub ids: String,
    pub name: String,
    pub mf: String,
    pub sn: String,
    pub sw: String,
    pub hw: String,
}

/// Origin block (`o`) of the discovery document.
#[derive(Debug, Clone, Serialize)]
pub struct OriginInfo {
    pub name: String,
    pub sw: String,
    pub url: String,
}

/// One discovery component, tagged by platform (`p`).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "p")]
pub enum Component {
    #[serde(rename = "button")]
    Button {
        name: String,
        payload_press: String,
        unique_id: String,
        icon: String,
    },
    #[serde(rename = "binary_sensor")]
    BinarySensor {
        name: String,
        unique_id: String,
        off_delay: u32,
        state_topic: String,
        icon: String,
    },
}

/// Build the discovery document for the door registry.
///
/// Deterministic: the component map is ordered, so the same registry
/// always serializes to the same bytes.
pub fn device_descriptor(doors: &[Door]) -> DeviceDescriptor {
    let mut cmps = BTreeMap::new();
    for door in doors {
        cmps.insert(format!("door_{}", door.id), button_component(door));
        cmps.insert(format!("door_isopen_{}", door.id), sensor_component(door));
    }

    DeviceDescriptor {
        dev: DeviceInfo {
            ids: "aptus_open".into(),
            name: "Aptus Open".into(),
            mf: "SA6NYA/TRN".into(),
            sn: "no".into(),
            sw: "1.0".into(),
            hw: "1.0".into(),
        },
        o: OriginInfo {
            name: "Aptus Open".into(),
            sw: "1.0".into(),
            url: "https://coral.shoes/".into(),
        },
        command_topic: topics::COMMAND_TOPIC.to_owned(),
        cmps,
        qos: 2,
    }
}

fn button_component(door: &Door) -> Component {
    Component::Button {
        name: format!("Open {}", door.name),
        payload_press: topics::open_payload(&door.id),
        unique_id: format!("apto_open_{}", door.id),
        icon: door
            .icon
            .clone()
            .unwrap_or_else(|| BUTTON_ICON.to_owned()),
    }
}

fn sensor_component(door: &Door) -> Component {
    Component::BinarySensor {
        name: format!("{} is open", door.name),
        unique_id: format!("apto_is_open_{}", door.id),
        off_delay: SENSOR_OFF_DELAY,
        state_topic: topics::state_topic(&door.id),
        icon: SENSOR_ICON.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn front_door() -> Door {
        Door {
            id: "A1".into(),
            name: "Front Door".into(),
            icon: None,
        }
    }

    #[test]
    fn single_door_descriptor_shape() {
        let descriptor = device_descriptor(&[front_door()]);
        let value = serde_json::to_value(&descriptor).expect("serializable");

        assert_eq!(value["command_topic"], "home/aptus_open/command");
        assert_eq!(value["qos"], 2);
        assert_eq!(value["dev"]["ids"], "aptus_open");

        let button = &value["cmps"]["door_A1"];
        assert_eq!(
            button,
            &json!({
                "p": "button",
                "name": "Open Front Door",
                "payload_press": "open_A1",
                "unique_id": "apto_open_A1",
                "icon": "mdi:lock-open-variant",
            })
        );

        let sensor = &value["cmps"]["door_isopen_A1"];
        assert_eq!(sensor["p"], "binary_sensor");
        assert_eq!(sensor["name"], "Front Door is open");
        assert_eq!(sensor["state_topic"], "home/aptus_open/A1/state");
        assert_eq!(sensor["off_delay"], 5);
        assert_eq!(sensor["icon"], "mdi:door");
    }

    #[test]
    fn configured_icon_wins_over_default() {
        let door = Door {
            id: "B2".into(),
            name: "Garage".into(),
            icon: Some("mdi:garage".into()),
        };
        let descriptor = device_descriptor(&[door]);
        let value = serde_json::to_value(&descriptor).expect("serializable");
        assert_eq!(value["cmps"]["door_B2"]["icon"], "mdi:garage");
    }

    #[test]
    fn one_button_and_one_sensor_per_door() {
        let doors = vec![
            front_door(),
            Door {
                id: "B2".into(),
                name: "Garage".into(),
                icon: None,
            },
        ];
        let descriptor = device_descriptor(&doors);
        assert_eq!(descriptor.cmps.len(), 4);

        let value = serde_json::to_value(&descriptor).expect("serializable");
        let keys: Vec<String> = value["cmps"]
            .as_object()
            .expect("cmps is a map")
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["door_A1", "door_B2", "door_isopen_A1", "door_isopen_B2"]);
    }
}
