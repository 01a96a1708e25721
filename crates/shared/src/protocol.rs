use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CommunityId, DeviceId, PostId, UserId};

/// Exchange a stored refresh token for a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub refresh_token: String,
    pub device_id: DeviceId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_token: String,
    pub user_id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub user_id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunitySummary {
    pub community_id: CommunityId,
    pub name: String,
    pub member_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub post_id: PostId,
    pub community_id: CommunityId,
    pub author_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_username: Option<String>,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<PostSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_before: Option<PostId>,
}
