use anyhow::Result;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::Config;
use crate::extract::ExtractError;

const PROFILE_URL_BASE: &str = "https://www.linkedin.com/in/";

/// Authenticated profile-page fetcher. Redirects are classified, not
/// followed: LinkedIn bounces expired sessions to /authwall.
pub struct Fetcher {
    client: reqwest::Client,
    config: Config,
}

impl Fetcher {
    pub fn new(config: Config) -> Result<Fetcher> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Fetcher { client, config })
    }

    /// Fetch the raw HTML of one profile page.
    pub async fn fetch_profile_page(&self, vanity_name: &str) -> Result<String, ExtractError> {
        let url = format!("{}{}/", PROFILE_URL_BASE, vanity_name);
        let cookie = format!(
            "li_at={}; JSESSIONID={}",
            self.config.cookies.li_at, self.config.cookies.jsessionid
        );

        let response = self
            .client
            .get(&url)
            .header("cookie", cookie)
            .header("user-agent", &self.config.user_agent)
            .header(
                "accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("accept-language", "en-US,en;q=0.9")
            .header("cache-control", "no-cache")
            .header("sec-fetch-dest", "document")
            .header("sec-fetch-mode", "navigate")
            .header("sec-fetch-site", "none")
            .send()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ExtractError::NotFoundRemote);
        }

        if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND {
            let location = response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            if location.contains("/authwall") {
                return Err(ExtractError::AuthRequired);
            }
            return Err(ExtractError::UnexpectedRedirect(location));
        }

        if status != StatusCode::OK {
            return Err(ExtractError::Http(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;
        debug!("fetched profile page for {} ({} bytes)", vanity_name, html.len());

        Ok(html)
    }
}
