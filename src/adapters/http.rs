use crate::domain::ports::InputSource;
use crate::utils::error::{HarnessError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Fetches puzzle inputs with a single GET relative to a base URL.
///
/// No retry and no timeout: a request that never completes leaves its mount
/// pending.
#[derive(Debug, Clone)]
pub struct HttpInputs {
    base_url: Url,
    client: Client,
}

impl HttpInputs {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)?;

        // 確保路徑以 '/' 結尾，否則 join 會取代最後一段路徑
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Relative locators resolve against the base; absolute URLs pass through.
    pub fn resolve(&self, locator: &str) -> Result<Url> {
        Ok(self.base_url.join(locator)?)
    }
}

#[async_trait]
impl InputSource for HttpInputs {
    async fn fetch_text(&self, locator: &str) -> Result<String> {
        let url = self.resolve(locator)?;
        tracing::debug!("Making input request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Input response status: {}", status);

        if !status.is_success() {
            return Err(HarnessError::FetchStatusError {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        String::from_utf8(body.to_vec()).map_err(|_| HarnessError::InvalidUtf8Error {
            locator: locator.to_string(),
        })
    }
}
