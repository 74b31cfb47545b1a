// Portal HTTP client.
//
// Thin, stateless handle over the endpoint set and transport tuning. The
// mutable state -- cookies -- lives in the `Session` values the client
// produces, so one client can mint any number of independent sessions.
// The login handshake lives in `auth.rs`, the unlock request in `locks.rs`.

use crate::endpoints::Endpoints;
use crate::transport::TransportConfig;

/// Client for the resident portal and the Aptus lock portal.
#[derive(Debug, Clone, Default)]
pub struct AptusClient {
    endpoints: Endpoints,
    transport: TransportConfig,
}

impl AptusClient {
    /// Create a client with explicit endpoints and transport tuning.
    pub fn new(endpoints: Endpoints, transport: TransportConfig) -> Self {
        Self {
            endpoints,
            transport,
        }
    }

    /// The configured endpoint set.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn transport(&self) -> &TransportConfig {
        &self.transport
    }
}
