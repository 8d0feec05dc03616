//! Lorem Picsum gallery HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::PicsumImageResponse;
use crate::domain::entities::{Image, ImageId, ImagePage, ImageQuery};
use crate::domain::errors::ImageError;
use crate::domain::ports::RemoteImagePort;

/// Default gallery API base URL.
pub const PICSUM_API_BASE: &str = "https://picsum.photos";

const USER_AGENT: &str = concat!("pixvault/", env!("CARGO_PKG_VERSION"));

/// Gallery client for the Picsum `v2/list` and `id/{id}/info` endpoints.
pub struct PicsumClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for PicsumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PicsumClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PicsumClient {
    /// Creates client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout_secs: u64) -> Result<Self, ImageError> {
        Self::with_base_url(PICSUM_API_BASE, timeout_secs)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ImageError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ImageError::remote(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the list endpoint URL for `query`.
    #[must_use]
    pub fn list_url(&self, query: ImageQuery) -> String {
        format!(
            "{}/v2/list?page={}&limit={}",
            self.base_url, query.page, query.limit
        )
    }

    /// Returns the info endpoint URL for `id`.
    #[must_use]
    pub fn info_url(&self, id: &ImageId) -> String {
        format!("{}/id/{}/info", self.base_url, id)
    }

    async fn get_json<T>(&self, url: &str) -> Result<T, ImageError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(url = %url, "Requesting gallery");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Gallery request failed");
            if e.is_timeout() {
                ImageError::remote("request timed out")
            } else if e.is_connect() {
                ImageError::remote("failed to connect to gallery")
            } else {
                ImageError::remote(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ImageError::remote("image not found"));
        }
        if !status.is_success() {
            return Err(ImageError::remote(format!("unexpected response: {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ImageError::remote(format!("failed to parse response: {e}")))
    }
}

/// A full page means more may follow, unless the page number cannot advance.
fn page_from(items: Vec<PicsumImageResponse>, query: ImageQuery) -> ImagePage {
    let next_page = if items.len() == query.limit as usize {
        query.page.checked_add(1)
    } else {
        None
    };

    ImagePage {
        images: items.into_iter().map(Image::from).collect(),
        has_more: next_page.is_some(),
        next_page,
    }
}

#[async_trait]
impl RemoteImagePort for PicsumClient {
    async fn fetch_page(&self, query: ImageQuery) -> Result<ImagePage, ImageError> {
        let items: Vec<PicsumImageResponse> = self.get_json(&self.list_url(query)).await?;
        Ok(page_from(items, query))
    }

    async fn fetch_image(&self, id: &ImageId) -> Result<Image, ImageError> {
        let item: PicsumImageResponse = self.get_json(&self.info_url(id)).await?;
        Ok(item.into())
    }
}
