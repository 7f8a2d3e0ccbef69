use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{FollowEdge, NewReview, Profile, Review, UserId};
use crate::services::store::{FollowStore, ProfileStore, ReviewStore, StoreError, StoreHealth};

#[derive(Debug, Default)]
struct MemoryState {
    edges: BTreeSet<FollowEdge>,
    reviews: Vec<Review>,
    next_review_id: i64,
    profiles: BTreeMap<UserId, Profile>,
}

impl MemoryState {
    fn is_mutual(&self, a: UserId, b: UserId) -> bool {
        let edge = FollowEdge::new(a, b);
        self.edges.contains(&edge) && self.edges.contains(&edge.reversed())
    }
}

/// In-process store for local runs and tests
///
/// All state sits behind one lock, so a precondition and the write that
/// depends on it always happen under the same write guard.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let profiles = profiles.into_iter().map(|p| (p.user_id, p)).collect();
        Self {
            state: RwLock::new(MemoryState {
                profiles,
                ..MemoryState::default()
            }),
        }
    }

    /// Load profiles from a JSON array on disk
    pub async fn from_profiles_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = tokio::fs::read(path.as_ref()).await?;
        let profiles: Vec<Profile> = serde_json::from_slice(&raw).map_err(|e| {
            StoreError::InvalidData(format!(
                "Failed to parse profiles from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        tracing::info!(
            "Seeded {} profiles from {}",
            profiles.len(),
            path.as_ref().display()
        );

        Ok(Self::with_profiles(profiles))
    }

    /// Number of stored edges
    pub async fn edge_count(&self) -> usize {
        self.state.read().await.edges.len()
    }
}

#[async_trait]
impl FollowStore for MemoryStore {
    async fn insert_edge(&self, edge: &FollowEdge) -> Result<bool, StoreError> {
        Ok(self.state.write().await.edges.insert(*edge))
    }

    async fn delete_edge(&self, edge: &FollowEdge) -> Result<bool, StoreError> {
        Ok(self.state.write().await.edges.remove(edge))
    }

    async fn is_mutual(&self, a: UserId, b: UserId) -> Result<bool, StoreError> {
        Ok(self.state.read().await.is_mutual(a, b))
    }

    async fn following(&self, follower_id: UserId) -> Result<Vec<UserId>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .edges
            .range(
                FollowEdge::new(follower_id, UserId::MIN)
                    ..=FollowEdge::new(follower_id, UserId::MAX),
            )
            .map(|e| e.following_id)
            .collect())
    }

    async fn followers(&self, following_id: UserId) -> Result<Vec<UserId>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .edges
            .iter()
            .filter(|e| e.following_id == following_id)
            .map(|e| e.follower_id)
            .collect())
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn insert_review_if_mutual(
        &self,
        review: &NewReview,
    ) -> Result<Option<Review>, StoreError> {
        let mut state = self.state.write().await;

        if !state.is_mutual(review.reviewer_id, review.reviewee_id) {
            return Ok(None);
        }

        state.next_review_id += 1;
        let stored = Review {
            review_id: state.next_review_id,
            reviewer_id: review.reviewer_id,
            reviewee_id: review.reviewee_id,
            rating: review.rating,
            content: review.content.clone(),
            created_at: chrono::Utc::now(),
        };
        state.reviews.push(stored.clone());

        Ok(Some(stored))
    }

    async fn reviews_for(&self, reviewee_id: UserId) -> Result<Vec<Review>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .reviews
            .iter()
            .rev()
            .filter(|r| r.reviewee_id == reviewee_id)
            .cloned()
            .collect())
    }

    async fn latest_reviews(&self, limit: usize) -> Result<Vec<Review>, StoreError> {
        let state = self.state.read().await;
        Ok(state.reviews.iter().rev().take(limit).cloned().collect())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.state.read().await.profiles.get(&user_id).cloned())
    }

    async fn candidate_profiles(
        &self,
        exclude_user_id: UserId,
    ) -> Result<Vec<Profile>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .profiles
            .values()
            .filter(|p| p.user_id != exclude_user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;

    fn review(reviewer_id: UserId, reviewee_id: UserId) -> NewReview {
        NewReview {
            reviewer_id,
            reviewee_id,
            rating: Rating::new(4).unwrap(),
            content: "tidy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_edge_reports_duplicates() {
        let store = MemoryStore::new();
        let edge = FollowEdge::new(1, 2);

        assert!(store.insert_edge(&edge).await.unwrap());
        assert!(!store.insert_edge(&edge).await.unwrap());
        assert_eq!(store.edge_count().await, 1);
    }

    #[tokio::test]
    async fn test_following_only_returns_own_edges() {
        let store = MemoryStore::new();
        for (a, b) in [(1, 3), (1, 2), (2, 1), (3, 1)] {
            store.insert_edge(&FollowEdge::new(a, b)).await.unwrap();
        }

        assert_eq!(store.following(1).await.unwrap(), vec![2, 3]);
        assert_eq!(store.followers(1).await.unwrap(), vec![2, 3]);
        assert!(store.following(4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_review_requires_both_edges() {
        let store = MemoryStore::new();
        store.insert_edge(&FollowEdge::new(1, 2)).await.unwrap();
        assert!(store.insert_review_if_mutual(&review(1, 2)).await.unwrap().is_none());

        store.insert_edge(&FollowEdge::new(2, 1)).await.unwrap();
        let stored = store
            .insert_review_if_mutual(&review(1, 2))
            .await
            .unwrap()
            .expect("mutual pair should be reviewable");
        assert_eq!(stored.review_id, 1);
        assert_eq!(store.reviews_for(2).await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_latest_reviews_newest_first() {
        let store = MemoryStore::new();
        for (a, b) in [(1, 2), (2, 1), (1, 3), (3, 1)] {
            store.insert_edge(&FollowEdge::new(a, b)).await.unwrap();
        }
        store.insert_review_if_mutual(&review(1, 2)).await.unwrap();
        store.insert_review_if_mutual(&review(3, 1)).await.unwrap();
        store.insert_review_if_mutual(&review(2, 1)).await.unwrap();

        let latest = store.latest_reviews(2).await.unwrap();
        let ids: Vec<i64> = latest.iter().map(|r| r.review_id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_candidate_profiles_excludes_target() {
        let store = MemoryStore::with_profiles(vec![
            Profile::with_features(1, 30, false, false, 1000),
            Profile::with_features(2, 40, true, false, 500),
        ]);

        let candidates = store.candidate_profiles(1).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].user_id, 2);
        assert!(store.get_profile(3).await.unwrap().is_none());
    }
}
