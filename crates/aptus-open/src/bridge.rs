// ── Command bridge ──
//
// Adapts the broker's event-driven interface to the door controller's
// synchronous contract. Commands are processed serially inside the poll
// loop -- an unlock (including a nested re-login) blocks the loop for its
// duration, which is deliberate: the portal session is shared state with
// no defined behavior under concurrent login.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet, Publish, QoS};
use secrecy::ExposeSecret;
use tracing::{debug, error, info, warn};

use aptus_core::{BridgeConfig, DoorController, device_descriptor, topics};

use crate::error::CliError;

/// Capacity of the client-to-eventloop request queue. Connect-time
/// publications (discovery + one OFF per door) are enqueued while the
/// loop is between polls, so this bounds the usable registry size.
const REQUEST_QUEUE_CAPACITY: usize = 64;

const CLIENT_ID: &str = "aptus-open";
const KEEP_ALIVE: Duration = Duration::from_secs(60);
const RECONNECT_PAUSE: Duration = Duration::from_secs(1);

/// Bridges inbound bus commands to the door controller and republishes
/// door/device state.
pub struct CommandBridge {
    controller: DoorController,
    config: BridgeConfig,
    /// Discovery document, serialized once -- published verbatim on
    /// every (re)connect.
    descriptor: Vec<u8>,
}

impl CommandBridge {
    /// Build the bridge and its retained discovery document.
    pub fn new(controller: DoorController, config: BridgeConfig) -> Result<Self, CliError> {
        let descriptor = serde_json::to_vec(&device_descriptor(&config.doors))?;
        Ok(Self {
            controller,
            config,
            descriptor,
        })
    }

    /// Connect to the broker and serve commands until the process dies.
    pub async fn run(mut self) -> Result<(), CliError> {
        let mut options = MqttOptions::new(
            CLIENT_ID,
            self.config.mqtt.host.as_str(),
            self.config.mqtt.port,
        );
        options.set_credentials(
            self.config.mqtt.username.as_str(),
            self.config.mqtt.password.expose_secret(),
        );
        options.set_keep_alive(KEEP_ALIVE);

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_QUEUE_CAPACITY);
        info!(
            broker = %self.config.mqtt.host,
            port = self.config.mqtt.port,
            "connecting to broker"
        );

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    info!(code = ?ack.code, "connected to broker");
                    self.on_connect(&client).await?;
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    self.on_message(&client, &publish).await;
                }
                Ok(_) => {}
                Err(e) => {
                    // rumqttc reconnects on the next poll; pace the retries.
                    warn!(error = %e, "broker connection error, retrying");
                    tokio::time::sleep(RECONNECT_PAUSE).await;
                }
            }
        }
    }

    /// (Re)connect housekeeping: subscribe, then reset presentation state.
    ///
    /// The retained discovery document and per-door OFF states go out on
    /// every reconnect, not just first boot, so the hub recovers from a
    /// broker restart without bridge intervention.
    async fn on_connect(&self, client: &AsyncClient) -> Result<(), CliError> {
        client
            .subscribe(topics::COMMAND_TOPIC, QoS::ExactlyOnce)
            .await?;

        client
            .publish(
                topics::DISCOVERY_TOPIC,
                QoS::ExactlyOnce,
                true,
                self.descriptor.clone(),
            )
            .await?;

        for door in &self.config.doors {
            client
                .publish(topics::state_topic(&door.id), QoS::ExactlyOnce, true, "OFF")
                .await?;
        }

        info!(
            doors = self.config.doors.len(),
            "published discovery and initial door states"
        );
        Ok(())
    }

    /// Handle one inbound message; anything off the command topic is ignored.
    async fn on_message(&mut self, client: &AsyncClient, publish: &Publish) {
        if publish.topic != topics::COMMAND_TOPIC {
            return;
        }

        let Ok(payload) = std::str::from_utf8(&publish.payload) else {
            warn!(topic = %publish.topic, "ignoring non-UTF-8 command payload");
            return;
        };
        debug!(payload, "command received");

        let Some(door_id) = topics::parse_open_command(payload) else {
            warn!(payload, "ignoring unrecognized command payload");
            return;
        };

        // Unknown door ids are a logged no-op, never a crash: commands come
        // from the bus and may reference doors this process was not
        // configured with.
        let Some(door) = self.config.door_by_id(door_id) else {
            warn!(door_id, "command for unknown door ignored");
            return;
        };
        let door = door.clone();

        match self.controller.unlock(&door).await {
            Ok(()) => {
                if let Err(e) = client
                    .publish(topics::state_topic(&door.id), QoS::ExactlyOnce, false, "ON")
                    .await
                {
                    warn!(error = %e, door = %door.id, "failed to publish door state");
                }
            }
            Err(e) => {
                // Log-only by decision: no failure state is published back
                // to the bus (DESIGN.md).
                error!(error = %e, door = %door.id, "unlock failed");
            }
        }
    }
}
