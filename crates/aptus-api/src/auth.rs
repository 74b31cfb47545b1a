// The three-legged login handshake.
//
// 1. Form-post credentials to the resident portal. The endpoint answers
//    200 even for bad credentials; the session cookie appearing in the
//    jar is the real success signal.
// 2. Fetch the aptus widget via the JSONP widgets endpoint and extract
//    the lock-portal handoff URL from it.
// 3. GET that URL, which sets the lock portal's own cookies into the
//    same jar. The accumulated jar is the session.
//
// All three legs share one fresh cookie jar per attempt; a successful
// session never mixes cookies from a prior attempt.

use std::sync::Arc;

use reqwest::cookie::Jar;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::client::AptusClient;
use crate::error::Error;
use crate::jsonp;
use crate::session::{Session, jar_has_cookie};

/// Cookie the portal sets once the form login succeeded.
const SSO_COOKIE: &str = "Fast2User_ssoId";

/// Widget that carries the lock-portal handoff URL.
const APTUS_LOGIN_WIDGET: &str = "aptuslogin@APTUSPORT";

/// Callback name sent to the JSONP endpoint; the server echoes it back.
const JSONP_CALLBACK: &str = "cb";

// ── Widget payload (leg 2) ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WidgetResponse {
    data: WidgetData,
}

#[derive(Debug, Deserialize)]
struct WidgetData {
    #[serde(rename = "aptuslogin@APTUSPORT")]
    aptus_login: AptusLoginWidget,
}

#[derive(Debug, Deserialize)]
struct AptusLoginWidget {
    objekt: Vec<AptusObjekt>,
}

#[derive(Debug, Deserialize)]
struct AptusObjekt {
    #[serde(rename = "aptusUrl")]
    aptus_url: String,
}

impl AptusClient {
    /// Run the full login handshake and produce a fresh [`Session`].
    ///
    /// Every call starts from an empty cookie jar. Any failed leg maps to
    /// [`Error::Authentication`] with a stage-specific reason.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Session, Error> {
        let jar = Arc::new(Jar::default());
        let http = self.transport().build_client(Arc::clone(&jar))?;

        self.portal_login(&http, &jar, username, password).await?;
        debug!("portal login complete");

        let aptus_url = self.discover_aptus_url(&http).await?;
        debug!(url = %aptus_url, "discovered lock portal handoff URL");

        self.lock_portal_handoff(&http, &aptus_url).await?;
        debug!("lock portal handoff complete");

        Ok(Session::new(http, aptus_url))
    }

    /// Leg 1: form-post credentials, then verify the SSO cookie landed.
    async fn portal_login(
        &self,
        http: &reqwest::Client,
        jar: &Jar,
        username: &str,
        password: &SecretString,
    ) -> Result<(), Error> {
        let login_url = self.endpoints().login_url();
        let redirect_to = self.endpoints().account_url();
        debug!(url = %login_url, "logging in to portal");

        http.post(login_url)
            .form(&[
                ("log", username),
                ("pwd", password.expose_secret()),
                ("redirect_to", redirect_to.as_str()),
            ])
            .send()
            .await
            .map_err(Error::Transport)?;

        // Status is useless here -- the portal returns 200 for rejected
        // credentials. The cookie is the contract.
        if !jar_has_cookie(jar, &self.endpoints().portal, SSO_COOKIE) {
            return Err(Error::Authentication {
                message: format!("portal login failed ({SSO_COOKIE} cookie not set)"),
            });
        }
        Ok(())
    }

    /// Leg 2: fetch the aptus widget and pull the handoff URL out of it.
    async fn discover_aptus_url(&self, http: &reqwest::Client) -> Result<Url, Error> {
        let widgets_url = self.endpoints().widgets_url();
        debug!(url = %widgets_url, "requesting aptus widget");

        let resp = http
            .get(widgets_url)
            .query(&[("callback", JSONP_CALLBACK), ("widgets[]", APTUS_LOGIN_WIDGET)])
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(discovery_failed(format!("HTTP {status}")));
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let json = jsonp::unwrap(&body)
            .ok_or_else(|| discovery_failed("malformed JSONP wrapper".into()))?;

        let widgets: WidgetResponse =
            serde_json::from_str(json).map_err(|e| discovery_failed(e.to_string()))?;

        let raw = widgets
            .data
            .aptus_login
            .objekt
            .first()
            .map(|obj| obj.aptus_url.as_str())
            .ok_or_else(|| discovery_failed("widget carries no objekt entries".into()))?;

        // The URL is normally absolute; tolerate a relative one by joining
        // it against the lock-portal base.
        Url::parse(raw)
            .or_else(|_| self.endpoints().lock_portal.join(raw))
            .map_err(|_| discovery_failed(format!("unparseable aptusUrl: {raw}")))
    }

    /// Leg 3: GET the discovered URL so the lock portal sets its cookies.
    async fn lock_portal_handoff(&self, http: &reqwest::Client, aptus_url: &Url) -> Result<(), Error> {
        let resp = http
            .get(aptus_url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("lock portal handoff failed (HTTP {status})"),
            });
        }
        Ok(())
    }
}

fn discovery_failed(reason: String) -> Error {
    Error::Authentication {
        message: format!("widget discovery failed: {reason}"),
    }
}
