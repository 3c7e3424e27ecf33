use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use dc_core::ports::ContentStorePort;
use dc_core::ContentAddress;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};

/// Content store over an IPFS gateway (retrieval) and, optionally, an IPFS
/// HTTP API (placement).
pub struct IpfsContentStore {
    http: reqwest::Client,
    gateway_url: String,
    api_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddResponse {
    hash: String,
    size: Option<String>,
}

impl IpfsContentStore {
    pub fn new(gateway_url: impl Into<String>, api_url: Option<String>) -> Self {
        Self::with_http(reqwest::Client::new(), gateway_url, api_url)
    }

    pub fn with_http(http: reqwest::Client, gateway_url: impl Into<String>, api_url: Option<String>) -> Self {
        let trim = |url: String| url.trim_end_matches('/').to_string();
        Self {
            http,
            gateway_url: trim(gateway_url.into()),
            api_url: api_url.map(trim),
        }
    }

    pub fn can_place(&self) -> bool {
        self.api_url.is_some()
    }
}

#[async_trait]
impl ContentStorePort for IpfsContentStore {
    fn locator(&self, address: &ContentAddress) -> String {
        format!("{}/ipfs/{}", self.gateway_url, address)
    }

    async fn place(&self, file_name: &str, bytes: Vec<u8>) -> Result<ContentAddress> {
        let api_url = self.api_url.as_deref().ok_or_else(|| {
            anyhow!("No IPFS API configured; set content.api_url or pass an existing CID")
        })?;
        let size = bytes.len();
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        let response: AddResponse = self
            .http
            .post(format!("{api_url}/api/v0/add"))
            .query(&[("pin", "true")])
            .multipart(form)
            .send()
            .await
            .context("IPFS add request failed")?
            .error_for_status()
            .context("IPFS add rejected")?
            .json()
            .await
            .context("Unexpected IPFS add response")?;

        info!(cid = %response.hash, size, stored_size = ?response.size, "Content added to IPFS");
        Ok(ContentAddress::from(response.hash))
    }

    async fn is_available(&self, address: &ContentAddress) -> Result<bool> {
        let locator = self.locator(address);
        let response = self
            .http
            .head(&locator)
            .send()
            .await
            .with_context(|| format!("Failed to reach {locator}"))?;
        debug!(status = %response.status(), locator, "Checked content availability");
        Ok(response.status().is_success())
    }

    async fn retrieve(&self, address: &ContentAddress) -> Result<Vec<u8>> {
        let locator = self.locator(address);
        let bytes = self
            .http
            .get(&locator)
            .send()
            .await
            .with_context(|| format!("Failed to reach {locator}"))?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
