//! Engine seam implementation
//!
//! Binds the session bootstrap's [`WebEngine`] trait to the CDP-driven
//! page: cookie operations go through the Network domain, navigation
//! through the shell's navigator. Every method resolves on the engine's
//! acknowledgment, which is what the bootstrap ordering contract rests on.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::{
    ClearBrowserCookiesParams, CookieParam, CookieSameSite,
};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::launch::cookies::{CookieEntry, SameSite};
use crate::session::WebEngine;
use crate::shell::navigation::PageNavigator;
use crate::shell::PageHandle;

impl From<SameSite> for CookieSameSite {
    fn from(policy: SameSite) -> Self {
        match policy {
            SameSite::None => CookieSameSite::None,
            SameSite::Lax => CookieSameSite::Lax,
        }
    }
}

#[async_trait]
impl WebEngine for PageHandle {
    #[instrument(skip(self))]
    async fn clear_cookies(&self) -> Result<()> {
        self.page
            .execute(ClearBrowserCookiesParams::default())
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, cookie), fields(name = %cookie.name))]
    async fn set_cookie(&self, cookie: &CookieEntry) -> Result<()> {
        let mut param = CookieParam::new(cookie.name.clone(), cookie.value.clone());
        param.domain = Some(cookie.domain.clone());
        param.path = Some("/".to_string());
        param.secure = Some(cookie.secure);
        param.http_only = Some(cookie.http_only);
        param.same_site = Some(cookie.same_site.into());

        self.page
            .set_cookie(param)
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;
        Ok(())
    }

    async fn load(&self, url: &str) -> Result<()> {
        PageNavigator::goto(self, url, self.timeout_ms).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site_mapping() {
        assert_eq!(CookieSameSite::from(SameSite::None), CookieSameSite::None);
        assert_eq!(CookieSameSite::from(SameSite::Lax), CookieSameSite::Lax);
    }
}
