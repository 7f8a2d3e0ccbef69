use std::sync::Arc;

use crate::core::SocialError;
use crate::models::{FollowEdge, UnfollowOutcome, UserId};
use crate::services::FollowStore;

/// Directed follow graph
///
/// Owns the edge invariants: no self-follow, at most one edge per ordered
/// pair, idempotent removal. Storage atomicity is delegated to the
/// `FollowStore`.
#[derive(Clone)]
pub struct FollowGraph {
    store: Arc<dyn FollowStore>,
}

impl FollowGraph {
    pub fn new(store: Arc<dyn FollowStore>) -> Self {
        Self { store }
    }

    /// Create the edge `follower_id -> following_id`
    pub async fn follow(
        &self,
        follower_id: UserId,
        following_id: UserId,
    ) -> Result<FollowEdge, SocialError> {
        let edge = Self::checked_edge(follower_id, following_id)?;

        if !self.store.insert_edge(&edge).await? {
            tracing::debug!("Duplicate follow {} -> {}", follower_id, following_id);
            return Err(SocialError::DuplicateEdge {
                follower_id,
                following_id,
            });
        }

        tracing::info!("User {} followed {}", follower_id, following_id);
        Ok(edge)
    }

    /// Remove the edge if present; removing a missing edge is not an error
    pub async fn unfollow(
        &self,
        follower_id: UserId,
        following_id: UserId,
    ) -> Result<UnfollowOutcome, SocialError> {
        let edge = Self::checked_edge(follower_id, following_id)?;

        let outcome = if self.store.delete_edge(&edge).await? {
            UnfollowOutcome::Removed
        } else {
            UnfollowOutcome::NotFollowing
        };

        tracing::info!(
            "User {} unfollowed {} ({:?})",
            follower_id,
            following_id,
            outcome
        );
        Ok(outcome)
    }

    /// Both users follow each other. Symmetric in its arguments.
    pub async fn is_mutual(&self, a: UserId, b: UserId) -> Result<bool, SocialError> {
        if a == b {
            return Ok(false);
        }
        Ok(self.store.is_mutual(a, b).await?)
    }

    pub async fn list_following(&self, follower_id: UserId) -> Result<Vec<UserId>, SocialError> {
        Ok(self.store.following(follower_id).await?)
    }

    pub async fn list_followers(&self, following_id: UserId) -> Result<Vec<UserId>, SocialError> {
        Ok(self.store.followers(following_id).await?)
    }

    fn checked_edge(follower_id: UserId, following_id: UserId) -> Result<FollowEdge, SocialError> {
        let edge = FollowEdge::new(follower_id, following_id);
        if edge.is_self_reference() {
            return Err(SocialError::InvalidSelfReference(follower_id));
        }
        Ok(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    fn graph() -> (FollowGraph, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (FollowGraph::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_follow_then_duplicate() {
        let (graph, store) = graph();

        graph.follow(1, 2).await.unwrap();
        let err = graph.follow(1, 2).await.unwrap_err();

        assert!(matches!(
            err,
            SocialError::DuplicateEdge {
                follower_id: 1,
                following_id: 2
            }
        ));
        assert_eq!(store.edge_count().await, 1);
    }

    #[tokio::test]
    async fn test_self_reference_rejected() {
        let (graph, store) = graph();

        assert!(matches!(
            graph.follow(5, 5).await,
            Err(SocialError::InvalidSelfReference(5))
        ));
        assert!(matches!(
            graph.unfollow(5, 5).await,
            Err(SocialError::InvalidSelfReference(5))
        ));
        assert_eq!(store.edge_count().await, 0);
    }

    #[tokio::test]
    async fn test_unfollow_is_idempotent() {
        let (graph, store) = graph();
        graph.follow(1, 2).await.unwrap();

        assert_eq!(graph.unfollow(1, 2).await.unwrap(), UnfollowOutcome::Removed);
        assert_eq!(
            graph.unfollow(1, 2).await.unwrap(),
            UnfollowOutcome::NotFollowing
        );
        assert_eq!(
            graph.unfollow(3, 4).await.unwrap(),
            UnfollowOutcome::NotFollowing
        );
        assert_eq!(store.edge_count().await, 0);
    }

    #[tokio::test]
    async fn test_mutual_requires_both_directions() {
        let (graph, _) = graph();

        graph.follow(1, 2).await.unwrap();
        assert!(!graph.is_mutual(1, 2).await.unwrap());
        assert!(!graph.is_mutual(2, 1).await.unwrap());

        graph.follow(2, 1).await.unwrap();
        assert!(graph.is_mutual(1, 2).await.unwrap());
        assert!(graph.is_mutual(2, 1).await.unwrap());

        graph.unfollow(2, 1).await.unwrap();
        assert!(!graph.is_mutual(1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_following_and_followers() {
        let (graph, _) = graph();
        graph.follow(1, 3).await.unwrap();
        graph.follow(1, 2).await.unwrap();
        graph.follow(4, 2).await.unwrap();

        let mut following = graph.list_following(1).await.unwrap();
        following.sort_unstable();
        assert_eq!(following, vec![2, 3]);

        let mut followers = graph.list_followers(2).await.unwrap();
        followers.sort_unstable();
        assert_eq!(followers, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_concurrent_follows_only_one_wins() {
        let (graph, store) = graph();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let graph = graph.clone();
                tokio::spawn(async move { graph.follow(7, 8).await })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(SocialError::DuplicateEdge { .. }) => duplicates += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(store.edge_count().await, 1);
    }
}
