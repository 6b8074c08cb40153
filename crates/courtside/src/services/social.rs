//! Likes, follows, and comments.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::types::{ClipId, UserId};

use super::PageQuery;

fn like_path(clip: &ClipId) -> String {
    format!("clips/{}/like", clip)
}

fn follow_path(user: &UserId) -> String {
    format!("users/{}/follow", user)
}

fn comments_path(clip: &ClipId) -> String {
    format!("clips/{}/comments", clip)
}

/// Social interactions on clips and users. Requires a session.
#[derive(Clone)]
pub struct SocialService {
    api: Arc<ApiClient>,
}

impl SocialService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Like a clip. Liking twice is a no-op server-side.
    #[instrument(skip(self), fields(clip = %clip))]
    pub async fn like(&self, clip: &ClipId) -> ApiResult<LikeState> {
        debug!("liking clip");
        self.api.post(&like_path(clip), &()).await
    }

    /// Remove a like from a clip.
    #[instrument(skip(self), fields(clip = %clip))]
    pub async fn unlike(&self, clip: &ClipId) -> ApiResult<LikeState> {
        debug!("unliking clip");
        self.api.delete(&like_path(clip)).await
    }

    /// Follow a user. Following yourself is rejected server-side.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn follow(&self, user: &UserId) -> ApiResult<FollowState> {
        debug!("following user");
        self.api.post(&follow_path(user), &()).await
    }

    /// Stop following a user.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn unfollow(&self, user: &UserId) -> ApiResult<FollowState> {
        debug!("unfollowing user");
        self.api.delete(&follow_path(user)).await
    }

    /// List the comments on a clip.
    #[instrument(skip(self, page), fields(clip = %clip))]
    pub async fn comments(&self, clip: &ClipId, page: &PageQuery) -> ApiResult<CommentPage> {
        debug!("listing comments");
        self.api.get(&comments_path(clip), page).await
    }

    /// Post a comment on a clip.
    #[instrument(skip(self, text), fields(clip = %clip))]
    pub async fn comment(&self, clip: &ClipId, text: &str) -> ApiResult<Comment> {
        debug!("posting comment");
        self.api
            .post(&comments_path(clip), &CreateCommentRequest { text })
            .await
    }
}

#[derive(Debug, Serialize)]
struct CreateCommentRequest<'a> {
    text: &'a str,
}

/// Like state of a clip after a like/unlike.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub clip_id: ClipId,
    pub liked: bool,
    pub like_count: u64,
}

/// Follow state of a user after a follow/unfollow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowState {
    pub user_id: UserId,
    pub following: bool,
    pub follower_count: u64,
}

/// Public profile of a user, embedded in comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A comment on a clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub clip_id: ClipId,
    pub author: UserProfile,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One page of comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub cursor: Option<String>,
}
