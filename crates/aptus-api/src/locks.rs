// The per-door unlock request.

use tracing::debug;

use crate::client::AptusClient;
use crate::error::Error;
use crate::session::Session;

impl AptusClient {
    /// Ask the lock portal to unlock one door, using `session`'s cookies.
    ///
    /// Outcome mapping:
    /// - 200 means the door opened.
    /// - Any other status means the session is stale -> [`Error::SessionExpired`].
    /// - Redirect-limit exhaustion means the portal is bouncing us to its
    ///   login page -> [`Error::SessionExpired`].
    /// - Everything else is a transport fault and does not imply expiry.
    pub async fn unlock(&self, session: &Session, door_id: &str) -> Result<(), Error> {
        let url = self.endpoints().unlock_url(door_id);
        debug!(%url, door_id, "unlocking door");

        let resp = match session.http().get(url).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_redirect() => {
                debug!(door_id, "redirect limit hit -- session is stale");
                return Err(Error::SessionExpired);
            }
            Err(e) => return Err(Error::Transport(e)),
        };

        let status = resp.status();
        if status.is_success() {
            debug!(door_id, "unlock accepted");
            Ok(())
        } else {
            debug!(door_id, %status, "unlock rejected");
            Err(Error::SessionExpired)
        }
    }
}
