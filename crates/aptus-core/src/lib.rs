// aptus-core: Domain layer between aptus-api and the bridge binary.

pub mod config;
pub mod controller;
pub mod discovery;
pub mod error;
pub mod topics;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BridgeConfig, Door, MqttSettings, PortalCredentials};
pub use controller::{ControllerState, DoorController};
pub use discovery::{DeviceDescriptor, device_descriptor};
pub use error::CoreError;
