// Endpoint set for the two cooperating web properties.
//
// The real hosts are compile-time defaults; both bases are overridable so
// the test suite can point the client at a fake portal. End users never
// configure these -- the portals are fixed.

use url::Url;

/// Production base URL of the resident portal (owns login + widgets).
pub const PORTAL_BASE: &str = "https://www.chalmersstudentbostader.se";

/// Production base URL of the Aptus lock portal (executes unlocks).
pub const LOCK_PORTAL_BASE: &str = "https://apt-www.chalmersstudentbostader.se";

const LOGIN_PATH: &str = "/wp-login.php";
const ACCOUNT_PATH: &str = "/mina-sidor/";
const WIDGETS_PATH: &str = "/widgets/";
const UNLOCK_PATH: &str = "/AptusPortal/Lock/UnlockEntryDoor";

/// Base URLs of the resident portal and the lock portal.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub portal: Url,
    pub lock_portal: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            portal: Url::parse(PORTAL_BASE).expect("hardcoded portal URL is valid"),
            lock_portal: Url::parse(LOCK_PORTAL_BASE).expect("hardcoded lock portal URL is valid"),
        }
    }
}

impl Endpoints {
    /// Endpoints for a test double serving both portals from one base.
    pub fn for_base(base: &Url) -> Self {
        Self {
            portal: base.clone(),
            lock_portal: base.clone(),
        }
    }

    /// The portal's form-login endpoint.
    pub(crate) fn login_url(&self) -> Url {
        self.portal_url(LOGIN_PATH)
    }

    /// The post-login redirect target ("my pages").
    pub(crate) fn account_url(&self) -> Url {
        self.portal_url(ACCOUNT_PATH)
    }

    /// The portal's widget-discovery endpoint (JSONP).
    pub(crate) fn widgets_url(&self) -> Url {
        self.portal_url(WIDGETS_PATH)
    }

    /// The lock portal's unlock endpoint for one door.
    pub(crate) fn unlock_url(&self, door_id: &str) -> Url {
        let base = self.lock_portal.as_str().trim_end_matches('/');
        let full = format!("{base}{UNLOCK_PATH}/{door_id}");
        Url::parse(&full).expect("invalid unlock URL")
    }

    fn portal_url(&self, path: &str) -> Url {
        let base = self.portal.as_str().trim_end_matches('/');
        let full = format!("{base}{path}");
        Url::parse(&full).expect("invalid portal URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_point_at_production() {
        let ep = Endpoints::default();
        assert_eq!(ep.login_url().as_str(), format!("{PORTAL_BASE}{LOGIN_PATH}"));
        assert_eq!(
            ep.unlock_url("A1").as_str(),
            format!("{LOCK_PORTAL_BASE}{UNLOCK_PATH}/A1")
        );
    }

    #[test]
    fn for_base_serves_both_portals() {
        let base = Url::parse("http://127.0.0.1:1234").expect("valid");
        let ep = Endpoints::for_base(&base);
        assert_eq!(ep.widgets_url().as_str(), "http://127.0.0.1:1234/widgets/");
        assert_eq!(
            ep.unlock_url("B2").as_str(),
            "http://127.0.0.1:1234/AptusPortal/Lock/UnlockEntryDoor/B2"
        );
    }
}
