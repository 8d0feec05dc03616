//! Gallery image entity and browsing value objects.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Unique identifier of a gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Creates a new `ImageId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An image from the remote gallery, optionally mirrored on local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Gallery identifier.
    pub id: ImageId,
    /// Remote URL of the full image.
    pub url: String,
    /// Path of the local copy, when one was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
    /// Author credited by the gallery.
    #[serde(default)]
    pub author: String,
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
}

impl Image {
    /// Creates an image without a local copy.
    #[must_use]
    pub fn new(
        id: impl Into<ImageId>,
        url: impl Into<String>,
        author: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            local_path: None,
            author: author.into(),
            width,
            height,
        }
    }

    /// Returns a copy pointing at the given local file.
    #[must_use]
    pub fn with_local_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_path = Some(path.into());
        self
    }

    /// Returns the local path, if any.
    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    /// Returns true if both identifier and URL are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.id.is_blank() && !self.url.trim().is_empty()
    }
}

/// Pagination parameters for browsing the remote gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageQuery {
    /// One-based page number.
    pub page: u32,
    /// Maximum images per page.
    pub limit: u32,
}

impl ImageQuery {
    /// Default page size used by the gallery.
    pub const DEFAULT_LIMIT: u32 = 30;

    /// Creates a query, clamping the page to at least 1 and the limit to at least 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

impl Default for ImageQuery {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

/// One page of gallery results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImagePage {
    /// Images on this page.
    pub images: Vec<Image>,
    /// Whether the gallery has more pages.
    pub has_more: bool,
    /// Page number to request next, if any.
    pub next_page: Option<u32>,
}
