// ── Door controller ──
//
// Owns the current authenticated session and the expire-and-retry policy:
// a failed unlock is read as "session likely expired", triggering exactly
// one re-authentication and one retry before the failure goes to the
// caller. If the re-authentication itself fails, the controller marks
// itself unusable and fails fast from then on.

use aptus_api::{AptusClient, Session};
use tracing::{debug, info, warn};

use crate::config::{Door, PortalCredentials};
use crate::error::CoreError;

/// Lifecycle state of the door controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Authenticating,
    Ready,
    Failed,
}

/// Serialized front-end to the lock portal.
///
/// The portal session is shared state with no defined behavior under
/// concurrent login, so all door operations run through one exclusive
/// handle (`&mut self`); the bridge's event loop provides that
/// serialization. A concurrent consumer must funnel calls through a
/// single writer instead of cloning this.
pub struct DoorController {
    client: AptusClient,
    credentials: PortalCredentials,
    session: Option<Session>,
    state: ControllerState,
}

impl DoorController {
    /// Create a controller. Does not authenticate -- call
    /// [`connect()`](Self::connect) for the initial login.
    pub fn new(client: AptusClient, credentials: PortalCredentials) -> Self {
        Self {
            client,
            credentials,
            session: None,
            state: ControllerState::Uninitialized,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Perform the initial authentication.
    ///
    /// On failure nothing is cached and the controller returns to
    /// `Uninitialized`, so the caller may retry.
    pub async fn connect(&mut self) -> Result<(), CoreError> {
        self.state = ControllerState::Authenticating;
        match self
            .client
            .authenticate(&self.credentials.username, &self.credentials.password)
            .await
        {
            Ok(session) => {
                self.session = Some(session);
                self.state = ControllerState::Ready;
                info!("authenticated against lock portal");
                Ok(())
            }
            Err(e) => {
                self.state = ControllerState::Uninitialized;
                Err(e.into())
            }
        }
    }

    /// Drop the session, releasing its connections, and reset.
    pub fn disconnect(&mut self) {
        if self.session.take().is_some() {
            debug!("session released");
        }
        self.state = ControllerState::Uninitialized;
    }

    // ── Unlock ───────────────────────────────────────────────────────

    /// Unlock one door, re-authenticating at most once on session expiry.
    pub async fn unlock(&mut self, door: &Door) -> Result<(), CoreError> {
        match self.state {
            ControllerState::Ready => {}
            ControllerState::Failed => return Err(CoreError::ControllerUnusable),
            ControllerState::Uninitialized | ControllerState::Authenticating => {
                return Err(CoreError::NotConnected);
            }
        }
        let session = self.session.as_ref().ok_or(CoreError::NotConnected)?;

        info!(door = %door.id, "unlocking {}", door.name);
        match self.client.unlock(session, &door.id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_auth_expired() => {
                info!(door = %door.id, "session expired, logging in again");
                self.refresh_session().await?;
                let session = self.session.as_ref().ok_or(CoreError::NotConnected)?;
                // One retry only; a second failure goes to the caller.
                self.client
                    .unlock(session, &door.id)
                    .await
                    .map_err(CoreError::from)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Re-authenticate and swap in the fresh session.
    ///
    /// The stale session is dropped only after the new one is in place;
    /// if re-authentication fails, the old session stays untouched and
    /// the controller transitions to `Failed`.
    async fn refresh_session(&mut self) -> Result<(), CoreError> {
        self.state = ControllerState::Authenticating;
        match self
            .client
            .authenticate(&self.credentials.username, &self.credentials.password)
            .await
        {
            Ok(fresh) => {
                let stale = self.session.replace(fresh);
                drop(stale);
                self.state = ControllerState::Ready;
                info!("session refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "re-authentication failed, controller unusable");
                self.state = ControllerState::Failed;
                Err(e.into())
            }
        }
    }
}

impl Drop for DoorController {
    fn drop(&mut self) {
        // Session teardown must happen on every exit path; dropping the
        // session drops its client and pooled connections.
        self.disconnect();
    }
}
