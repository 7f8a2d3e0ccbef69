use std::sync::Arc;

use crate::core::{FollowGraph, SocialError};
use crate::models::{NewReview, Rating, Review, UserId};
use crate::services::ReviewStore;

/// Authorizes and records reviews between mutually following users
///
/// The gate keeps no state of its own. `create_review` is the only way a
/// review gets written.
#[derive(Clone)]
pub struct ReviewGate {
    graph: FollowGraph,
    store: Arc<dyn ReviewStore>,
}

impl ReviewGate {
    pub fn new(graph: FollowGraph, store: Arc<dyn ReviewStore>) -> Self {
        Self { graph, store }
    }

    /// Check whether `reviewer_id` may review `reviewee_id` right now
    ///
    /// Pure predicate; nothing is persisted.
    pub async fn authorize_review(
        &self,
        reviewer_id: UserId,
        reviewee_id: UserId,
    ) -> Result<(), SocialError> {
        Self::reject_self_review(reviewer_id, reviewee_id)?;

        if !self.graph.is_mutual(reviewer_id, reviewee_id).await? {
            return Err(SocialError::NotMutuallyConnected {
                reviewer_id,
                reviewee_id,
            });
        }

        Ok(())
    }

    /// Validate and persist a review
    ///
    /// The mutual-follow check runs inside the same storage transaction as
    /// the insert, so an unfollow racing with this call either lands before
    /// (and the review is refused) or after the review commits.
    pub async fn create_review(
        &self,
        reviewer_id: UserId,
        reviewee_id: UserId,
        rating: i64,
        content: impl Into<String>,
    ) -> Result<Review, SocialError> {
        let rating = Rating::new(rating)?;
        Self::reject_self_review(reviewer_id, reviewee_id)?;

        let review = NewReview {
            reviewer_id,
            reviewee_id,
            rating,
            content: content.into(),
        };

        match self.store.insert_review_if_mutual(&review).await? {
            Some(stored) => {
                tracing::info!(
                    "Review {} recorded: {} -> {} ({} stars)",
                    stored.review_id,
                    reviewer_id,
                    reviewee_id,
                    rating.value()
                );
                Ok(stored)
            }
            None => {
                tracing::debug!(
                    "Review refused, {} and {} are not mutual followers",
                    reviewer_id,
                    reviewee_id
                );
                Err(SocialError::NotMutuallyConnected {
                    reviewer_id,
                    reviewee_id,
                })
            }
        }
    }

    /// Reviews received by a user, newest first
    pub async fn reviews_for(&self, reviewee_id: UserId) -> Result<Vec<Review>, SocialError> {
        Ok(self.store.reviews_for(reviewee_id).await?)
    }

    /// Newest reviews across all users
    pub async fn latest_reviews(&self, limit: usize) -> Result<Vec<Review>, SocialError> {
        Ok(self.store.latest_reviews(limit).await?)
    }

    fn reject_self_review(reviewer_id: UserId, reviewee_id: UserId) -> Result<(), SocialError> {
        if reviewer_id == reviewee_id {
            return Err(SocialError::SelfReview(reviewer_id));
        }
        Ok(())
    }
}
