use serde::{Deserialize, Serialize};

use crate::models::domain::{Review, ScoredProfile, UnfollowOutcome, UserId};

/// Response for the follow endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    pub success: bool,
    pub follower_id: UserId,
    pub following_id: UserId,
}

/// Response for the unfollow endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnfollowResponse {
    pub success: bool,
    pub follower_id: UserId,
    pub following_id: UserId,
    pub outcome: UnfollowOutcome,
}

/// Users followed by `follower_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowingResponse {
    pub follower_id: UserId,
    pub following_ids: Vec<UserId>,
}

/// Users following `following_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowersResponse {
    pub following_id: UserId,
    pub follower_ids: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutualResponse {
    pub a: UserId,
    pub b: UserId,
    pub mutual: bool,
}

/// Response for the create review endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewResponse {
    pub success: bool,
    pub review: Review,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<Review>,
}

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub user_id: UserId,
    pub recommendations: Vec<ScoredProfile>,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
