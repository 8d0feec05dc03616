//! Gallery API response types.

use serde::Deserialize;

use crate::domain::entities::Image;

/// Image record returned by the gallery list and info endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PicsumImageResponse {
    /// Gallery id.
    pub id: String,
    /// Photographer name.
    #[serde(default)]
    pub author: String,
    /// Original width.
    #[serde(default)]
    pub width: u32,
    /// Original height.
    #[serde(default)]
    pub height: u32,
    /// Page on the photo source site.
    #[serde(default)]
    pub url: Option<String>,
    /// Direct link to the image bytes.
    pub download_url: String,
}

impl From<PicsumImageResponse> for Image {
    fn from(dto: PicsumImageResponse) -> Self {
        Self::new(dto.id, dto.download_url, dto.author, dto.width, dto.height)
    }
}
