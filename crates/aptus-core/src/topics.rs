// Message-bus topic scheme and command-payload convention.
//
// Door ids are embedded verbatim in topic names, which is why the
// registry enforces their uniqueness.

/// Retained discovery-config topic consumed by the home-automation hub.
pub const DISCOVERY_TOPIC: &str = "homeassistant/device/aptus_open/config";

/// The single inbound command topic.
pub const COMMAND_TOPIC: &str = "home/aptus_open/command";

const STATE_PREFIX: &str = "home/aptus_open";

/// Tag that marks an unlock command payload: `open_<door-id>`.
const OPEN_TAG: &str = "open_";

/// State topic for one door: `home/aptus_open/<id>/state`.
pub fn state_topic(door_id: &str) -> String {
    format!("{STATE_PREFIX}/{door_id}/state")
}

/// Payload a button press publishes for one door.
pub fn open_payload(door_id: &str) -> String {
    format!("{OPEN_TAG}{door_id}")
}

/// Extract the door id from an `open_<id>` command payload.
///
/// Returns `None` for unrecognized tags and for a bare `open_` with no id.
pub fn parse_open_command(payload: &str) -> Option<&str> {
    payload.strip_prefix(OPEN_TAG).filter(|id| !id.is_empty())
}
