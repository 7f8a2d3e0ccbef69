use thiserror::Error;

use crate::models::UserId;
use crate::services::StoreError;

/// Failures reported by the social graph, review gate and recommender
///
/// Every variant except `StorageFailure` describes a request the caller can
/// correct.
#[derive(Debug, Error)]
pub enum SocialError {
    #[error("User {0} cannot follow or unfollow themselves")]
    InvalidSelfReference(UserId),

    #[error("User {follower_id} already follows user {following_id}")]
    DuplicateEdge {
        follower_id: UserId,
        following_id: UserId,
    },

    #[error("User {0} cannot review themselves")]
    SelfReview(UserId),

    #[error("Users {reviewer_id} and {reviewee_id} do not follow each other")]
    NotMutuallyConnected {
        reviewer_id: UserId,
        reviewee_id: UserId,
    },

    #[error("Rating {0} is not an integer in 1..=5")]
    InvalidRating(String),

    #[error("No profile found for user {0}")]
    ProfileNotFound(UserId),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

impl SocialError {
    /// Stable machine-readable kind, used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            SocialError::InvalidSelfReference(_) => "invalid_self_reference",
            SocialError::DuplicateEdge { .. } => "duplicate_edge",
            SocialError::SelfReview(_) => "self_review",
            SocialError::NotMutuallyConnected { .. } => "not_mutually_connected",
            SocialError::InvalidRating(_) => "invalid_rating",
            SocialError::ProfileNotFound(_) => "profile_not_found",
            SocialError::StorageFailure(_) => "storage_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(SocialError::InvalidRating("9".into()).kind(), "invalid_rating");
        assert_eq!(
            SocialError::DuplicateEdge {
                follower_id: 1,
                following_id: 2
            }
            .kind(),
            "duplicate_edge"
        );
        let storage: SocialError = StoreError::InvalidData("bad".into()).into();
        assert_eq!(storage.kind(), "storage_failure");
    }

    #[test]
    fn test_error_messages_carry_ids() {
        let err = SocialError::NotMutuallyConnected {
            reviewer_id: 4,
            reviewee_id: 9,
        };
        assert_eq!(err.to_string(), "Users 4 and 9 do not follow each other");
    }
}
