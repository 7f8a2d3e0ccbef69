use serde::{Deserialize, Serialize};

use crate::core::SocialError;

/// Opaque user identifier, owned by the surrounding account system
pub type UserId = i64;

/// Directed follow relationship: `follower_id` observes `following_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: UserId,
    pub following_id: UserId,
}

impl FollowEdge {
    pub fn new(follower_id: UserId, following_id: UserId) -> Self {
        Self {
            follower_id,
            following_id,
        }
    }

    /// The same pair pointing the other way
    pub fn reversed(&self) -> Self {
        Self {
            follower_id: self.following_id,
            following_id: self.follower_id,
        }
    }

    pub fn is_self_reference(&self) -> bool {
        self.follower_id == self.following_id
    }
}

/// Result of an unfollow request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnfollowOutcome {
    Removed,
    NotFollowing,
}

/// Review rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, SocialError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SocialError::InvalidRating(value.to_string()))
        }
    }

    /// Parse a rating straight from a request body. Only JSON integers are
    /// accepted; floats, strings and nulls are invalid ratings.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SocialError> {
        match value.as_i64() {
            Some(n) => Self::new(n),
            None => Err(SocialError::InvalidRating(value.to_string())),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = SocialError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0 as i64
    }
}

/// A review that passed validation and is waiting to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub reviewer_id: UserId,
    pub reviewee_id: UserId,
    pub rating: Rating,
    pub content: String,
}

impl NewReview {
    /// The reviewer -> reviewee edge whose reverse must also exist
    pub fn edge(&self) -> FollowEdge {
        FollowEdge::new(self.reviewer_id, self.reviewee_id)
    }
}

/// Persisted review; immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub reviewer_id: UserId,
    pub reviewee_id: UserId,
    pub rating: Rating,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Roommate profile as read from the profile store
///
/// Only `age`, `is_smoking`, `snoring` and `budget` take part in similarity
/// scoring. The remaining fields are display payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub is_smoking: bool,
    #[serde(default)]
    pub snoring: bool,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub preferred_region: Option<String>,
}

impl Profile {
    /// Profile with only the scored features set
    pub fn with_features(
        user_id: UserId,
        age: i32,
        is_smoking: bool,
        snoring: bool,
        budget: i64,
    ) -> Self {
        Self {
            user_id,
            age: Some(age),
            is_smoking,
            snoring,
            budget: Some(budget),
            photo_url: None,
            introduction: None,
            preferred_region: None,
        }
    }

    /// True when every numeric feature has a value
    pub fn has_complete_features(&self) -> bool {
        self.age.is_some() && self.budget.is_some()
    }
}

/// A candidate profile with its similarity to the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProfile {
    #[serde(flatten)]
    pub profile: Profile,
    pub similarity: f64,
}

/// What to do with profiles whose numeric features are missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFeaturePolicy {
    /// Skip incomplete candidates; missing target values count as zero
    #[default]
    Exclude,
    /// Treat every missing value as zero
    ZeroFill,
}
