//! HTTP client for the vendor's catalog pages and stock-status endpoint.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use stockcmp_core::AppConfig;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

/// Where the vendor serves its catalog and stock answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Catalog URL with `{zipcode}` and `{page}` placeholders.
    pub catalog_url_template: String,
    pub stock_status_url: String,
}

/// Fetches raw catalog HTML and raw stock-status text.
///
/// Transient errors (429, network failures, 5xx) are retried with
/// exponential backoff up to `max_retries` additional attempts. With the
/// default of zero retries a failed call surfaces immediately and the
/// caller drops that item.
pub struct VendorClient {
    client: Client,
    endpoints: Endpoints,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl VendorClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoints: Endpoints,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoints,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`VendorClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            Endpoints {
                catalog_url_template: config.catalog_url_template.clone(),
                stock_status_url: config.stock_status_url.clone(),
            },
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The catalog URL for one page of one zipcode.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the filled-in template does not
    /// parse as an absolute URL.
    pub fn catalog_url(&self, zipcode: &str, page: u32) -> Result<String, ScraperError> {
        let filled = self
            .endpoints
            .catalog_url_template
            .replace("{zipcode}", zipcode)
            .replace("{page}", &page.to_string());
        let url = reqwest::Url::parse(&filled).map_err(|e| ScraperError::InvalidUrl {
            url: filled.clone(),
            reason: e.to_string(),
        })?;
        Ok(url.to_string())
    }

    /// Fetches one catalog page's HTML.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if the URL cannot be built.
    /// - [`ScraperError::RateLimited`] on HTTP 429 after retries.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure after retries.
    pub async fn fetch_catalog_page(
        &self,
        zipcode: &str,
        page: u32,
    ) -> Result<String, ScraperError> {
        let url = self.catalog_url(zipcode, page)?;
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let response = check_status(response, &url, |s| s.is_success())?;
                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Posts one stock-status lookup and returns the raw `~`-delimited body.
    ///
    /// Only HTTP 200 counts as an answer; every other status is an error.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] on HTTP 429 after retries.
    /// - [`ScraperError::UnexpectedStatus`] on any status other than 200.
    /// - [`ScraperError::Http`] on network or TLS failure after retries.
    pub async fn fetch_stock_status(
        &self,
        part_number: &str,
        warehouse_code: &str,
        infor_id: u64,
    ) -> Result<String, ScraperError> {
        let url = self.endpoints.stock_status_url.as_str();
        let infor_id = infor_id.to_string();
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let form = [
                ("partnumber", part_number),
                ("warehouse", warehouse_code),
                ("inforid", infor_id.as_str()),
            ];
            async move {
                let response = self
                    .client
                    .post(url)
                    .header("X-Requested-With", "XMLHttpRequest")
                    .form(&form)
                    .send()
                    .await?;
                let response = check_status(response, url, |s| s == StatusCode::OK)?;
                Ok(response.text().await?)
            }
        })
        .await
    }
}

/// Maps 429 and any status failing `accept` to typed errors.
fn check_status(
    response: Response,
    url: &str,
    accept: impl Fn(StatusCode) -> bool,
) -> Result<Response, ScraperError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ScraperError::RateLimited {
            url: url.to_owned(),
            retry_after_secs,
        });
    }
    if !accept(status) {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
