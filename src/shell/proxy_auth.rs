//! Proxy credential responder
//!
//! Chromium takes the proxy endpoint as a launch argument but refuses
//! credentials there; the proxy answers the first request with an auth
//! challenge instead. This module enables Fetch-domain interception on the
//! host page and answers those challenges with the configured credentials.

use chromiumoxide::cdp::browser_protocol::fetch::{
    AuthChallengeResponse, AuthChallengeResponseResponse, ContinueRequestParams,
    ContinueWithAuthParams, EnableParams,
};
use chromiumoxide::cdp::browser_protocol::fetch::{EventAuthRequired, EventRequestPaused};
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::launch::proxy::ProxyConfig;

/// Enable interception and spawn the challenge/resume responders.
///
/// Must run before the first navigation: interception pauses every request,
/// so the responders have to be draining events by the time one goes out.
#[instrument(skip(page, proxy))]
pub async fn answer_challenges(page: &Page, proxy: &ProxyConfig) -> Result<()> {
    let enable = EnableParams::builder().handle_auth_requests(true).build();
    page.execute(enable)
        .await
        .map_err(|e| Error::cdp(e.to_string()))?;

    let mut auth_events = page
        .event_listener::<EventAuthRequired>()
        .await
        .map_err(|e| Error::cdp(e.to_string()))?;
    let mut paused_events = page
        .event_listener::<EventRequestPaused>()
        .await
        .map_err(|e| Error::cdp(e.to_string()))?;

    let auth_page = page.clone();
    let user = proxy.user.clone();
    let password = proxy.password.clone();
    tokio::spawn(async move {
        while let Some(event) = auth_events.next().await {
            debug!("answering proxy auth challenge");
            let response = AuthChallengeResponse {
                response: AuthChallengeResponseResponse::ProvideCredentials,
                username: Some(user.clone()),
                password: Some(password.clone()),
            };
            let params = ContinueWithAuthParams {
                request_id: event.request_id.clone(),
                auth_challenge_response: response,
            };
            if let Err(err) = auth_page.execute(params).await {
                warn!("failed to answer auth challenge: {err}");
            }
        }
    });

    // Interception pauses every request; each one must be resumed.
    let resume_page = page.clone();
    tokio::spawn(async move {
        while let Some(event) = paused_events.next().await {
            let params = ContinueRequestParams::new(event.request_id.clone());
            if let Err(err) = resume_page.execute(params).await {
                debug!("failed to resume paused request: {err}");
            }
        }
    });

    debug!("proxy auth responder installed");
    Ok(())
}
