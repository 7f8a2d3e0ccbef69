use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::UserId;

/// Request to follow or unfollow a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FollowRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "followerId")]
    pub follower_id: UserId,
    #[validate(range(min = 1))]
    #[serde(alias = "followingId")]
    pub following_id: UserId,
}

/// Query for the users someone follows
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FollowingQuery {
    #[validate(range(min = 1))]
    #[serde(alias = "followerId")]
    pub follower_id: UserId,
}

/// Query for the users following someone
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FollowersQuery {
    #[validate(range(min = 1))]
    #[serde(alias = "followingId")]
    pub following_id: UserId,
}

/// Query for the mutual-follow status of a pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MutualQuery {
    #[validate(range(min = 1))]
    pub a: UserId,
    #[validate(range(min = 1))]
    pub b: UserId,
}

/// Request to write a review
///
/// `rating` is kept as raw JSON so non-integer and out-of-range values come
/// back as `invalid_rating` rather than a payload error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "reviewerId")]
    pub reviewer_id: UserId,
    #[validate(range(min = 1))]
    #[serde(alias = "revieweeId")]
    pub reviewee_id: UserId,
    pub rating: serde_json::Value,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub content: String,
}

/// Request for roommate recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "userId")]
    pub user_id: UserId,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_request_accepts_camel_case() {
        let req: FollowRequest =
            serde_json::from_str(r#"{"followerId": 1, "followingId": 2}"#).unwrap();
        assert_eq!(req.follower_id, 1);
        assert_eq!(req.following_id, 2);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_follow_request_rejects_non_positive_ids() {
        let req = FollowRequest {
            follower_id: 0,
            following_id: 2,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_review_request_content_defaults_empty() {
        let req: CreateReviewRequest =
            serde_json::from_str(r#"{"reviewer_id": 1, "reviewee_id": 2, "rating": 5}"#).unwrap();
        assert_eq!(req.content, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_review_request_content_too_long() {
        let req = CreateReviewRequest {
            reviewer_id: 1,
            reviewee_id: 2,
            rating: serde_json::Value::from(3),
            content: "x".repeat(2001),
        };
        assert!(req.validate().is_err());
    }
}
