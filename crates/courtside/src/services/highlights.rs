//! Highlight clip metadata operations.
//!
//! Clips here are metadata records: the video itself lives in the object
//! store and is referenced by URL. Upload and thumbnailing are the backend's
//! concern.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::types::{ClipId, UserId, VenueId};

/// GET: the clip feed. POST: publish clip metadata.
const CLIPS: &str = "clips";

fn clip_path(clip: &ClipId) -> String {
    format!("clips/{}", clip)
}

/// Publish, browse, and delete highlight clips.
#[derive(Clone)]
pub struct HighlightService {
    api: Arc<ApiClient>,
}

impl HighlightService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch a page of the clip feed.
    #[instrument(skip(self, query))]
    pub async fn feed(&self, query: &ClipFeedQuery<'_>) -> ApiResult<ClipPage> {
        debug!("fetching clip feed");
        self.api.get(CLIPS, query).await
    }

    /// Fetch a single clip.
    #[instrument(skip(self), fields(clip = %clip))]
    pub async fn get(&self, clip: &ClipId) -> ApiResult<Clip> {
        self.api.get(&clip_path(clip), &()).await
    }

    /// Publish a clip record for an already-uploaded video.
    #[instrument(skip(self, request), fields(title = request.title))]
    pub async fn create(&self, request: &CreateClipRequest<'_>) -> ApiResult<Clip> {
        debug!("publishing clip");
        self.api.post(CLIPS, request).await
    }

    /// Delete one of the caller's clips.
    #[instrument(skip(self), fields(clip = %clip))]
    pub async fn delete(&self, clip: &ClipId) -> ApiResult<()> {
        debug!("deleting clip");
        self.api.delete_no_content(&clip_path(clip)).await
    }
}

/// Query parameters for the clip feed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipFeedQuery<'a> {
    /// Restrict the feed to one author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a UserId>,
    /// Restrict the feed to clips shot at one venue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<&'a VenueId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
}

/// Request body for clip publication.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClipRequest<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<&'a VenueId>,
    pub video_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<&'a str>,
    pub duration_secs: u32,
}

/// A highlight clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,
    pub author_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub venue_id: Option<VenueId>,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub duration_secs: u32,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
}

/// One page of the clip feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPage {
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub cursor: Option<String>,
}
