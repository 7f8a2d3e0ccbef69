use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::{
    similarity::{cosine_similarity, FeatureVector},
    SocialError,
};
use crate::models::{MissingFeaturePolicy, Profile, ScoredProfile, UserId};
use crate::services::ProfileStore;

/// Result of a recommendation request
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredProfile>,
    pub total_candidates: usize,
}

/// Ranks roommate candidates by cosine similarity to a target profile
///
/// # Ranking
/// 1. Build the target's feature vector
/// 2. Drop the target itself and, under `Exclude`, incomplete candidates
/// 3. Score every remaining candidate
/// 4. Sort by similarity (descending), then user id (ascending)
/// 5. Keep the first `k`
#[derive(Clone)]
pub struct SimilarityRecommender {
    store: Arc<dyn ProfileStore>,
    policy: MissingFeaturePolicy,
    max_limit: usize,
}

impl SimilarityRecommender {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        policy: MissingFeaturePolicy,
        max_limit: usize,
    ) -> Self {
        Self {
            store,
            policy,
            max_limit,
        }
    }

    /// Top `k` candidates for `target_user_id`, recomputed from a fresh
    /// profile snapshot on every call
    pub async fn recommend(
        &self,
        target_user_id: UserId,
        k: usize,
    ) -> Result<RecommendationResult, SocialError> {
        let target = self
            .store
            .get_profile(target_user_id)
            .await?
            .ok_or(SocialError::ProfileNotFound(target_user_id))?;

        let candidates = self.store.candidate_profiles(target_user_id).await?;
        let k = k.min(self.max_limit);

        let result = rank_candidates(&target, candidates, k, self.policy);

        tracing::info!(
            "Recommending {} profiles for user {} (from {} candidates)",
            result.recommendations.len(),
            target_user_id,
            result.total_candidates
        );

        Ok(result)
    }
}

/// Score and order `candidates` against `target`
///
/// Deterministic: identical inputs always give the same order, regardless of
/// the order candidates arrive in.
pub fn rank_candidates(
    target: &Profile,
    candidates: Vec<Profile>,
    k: usize,
    policy: MissingFeaturePolicy,
) -> RecommendationResult {
    let total_candidates = candidates.len();
    let target_vector = FeatureVector::for_target(target);

    let mut scored: Vec<ScoredProfile> = candidates
        .into_iter()
        .filter(|profile| profile.user_id != target.user_id)
        .filter_map(|profile| {
            let vector = FeatureVector::for_candidate(&profile, policy)?;
            let similarity = cosine_similarity(&target_vector, &vector);
            Some(ScoredProfile {
                profile,
                similarity,
            })
        })
        .collect();

    scored.sort_by(compare_scored);
    scored.truncate(k);

    RecommendationResult {
        recommendations: scored,
        total_candidates,
    }
}

/// Similarity descending, then user id ascending
fn compare_scored(a: &ScoredProfile, b: &ScoredProfile) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| a.profile.user_id.cmp(&b.profile.user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    fn target() -> Profile {
        Profile::with_features(1, 30, false, false, 1000)
    }

    #[test]
    fn test_identical_profile_ranks_first() {
        let candidates = vec![
            Profile::with_features(3, 60, true, true, 100),
            Profile::with_features(2, 30, false, false, 1000),
        ];

        let result = rank_candidates(&target(), candidates, 5, MissingFeaturePolicy::Exclude);

        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.recommendations[0].profile.user_id, 2);
        assert!((result.recommendations[0].similarity - 1.0).abs() < 1e-12);
        assert!(result.recommendations[1].similarity < 1.0);
    }

    #[test]
    fn test_ties_break_by_user_id() {
        let candidates = vec![
            Profile::with_features(9, 30, false, false, 1000),
            Profile::with_features(4, 60, false, false, 2000),
            Profile::with_features(5, 30, false, false, 1000),
        ];

        let first =
            rank_candidates(&target(), candidates.clone(), 5, MissingFeaturePolicy::Exclude);
        let mut reversed = candidates;
        reversed.reverse();
        let second = rank_candidates(&target(), reversed, 5, MissingFeaturePolicy::Exclude);

        let ids = |r: &RecommendationResult| -> Vec<UserId> {
            r.recommendations.iter().map(|s| s.profile.user_id).collect()
        };
        // 4 is a scaled copy of the target, so all three tie at 1.0
        assert_eq!(ids(&first), vec![4, 5, 9]);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_zero_target_scores_zero() {
        let zero = Profile::with_features(1, 0, false, false, 0);
        let candidates = vec![
            Profile::with_features(2, 30, true, false, 1000),
            Profile::with_features(3, 22, false, true, 500),
        ];

        let result = rank_candidates(&zero, candidates, 5, MissingFeaturePolicy::Exclude);

        assert_eq!(result.recommendations.len(), 2);
        assert!(result.recommendations.iter().all(|s| s.similarity == 0.0));
    }

    #[test]
    fn test_limit_and_self_exclusion() {
        let mut candidates: Vec<Profile> = (2..20)
            .map(|id| Profile::with_features(id, 20 + id as i32, id % 2 == 0, false, 500 + id * 10))
            .collect();
        candidates.push(target());

        let result = rank_candidates(&target(), candidates, 5, MissingFeaturePolicy::Exclude);

        assert_eq!(result.recommendations.len(), 5);
        assert!(result.recommendations.iter().all(|s| s.profile.user_id != 1));
        for pair in result.recommendations.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_missing_feature_policy() {
        let mut incomplete = Profile::with_features(2, 30, false, false, 1000);
        incomplete.age = None;
        let candidates = vec![incomplete, Profile::with_features(3, 40, false, false, 900)];

        let excluded =
            rank_candidates(&target(), candidates.clone(), 5, MissingFeaturePolicy::Exclude);
        assert_eq!(excluded.recommendations.len(), 1);
        assert_eq!(excluded.total_candidates, 2);

        let filled = rank_candidates(&target(), candidates, 5, MissingFeaturePolicy::ZeroFill);
        assert_eq!(filled.recommendations.len(), 2);
    }

    #[tokio::test]
    async fn test_recommend_unknown_user() {
        let store = Arc::new(MemoryStore::with_profiles(vec![target()]));
        let recommender = SimilarityRecommender::new(store, MissingFeaturePolicy::Exclude, 50);

        assert!(matches!(
            recommender.recommend(42, 5).await,
            Err(SocialError::ProfileNotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_recommend_caps_at_max_limit() {
        let profiles = (1..=10).map(|id| Profile::with_features(id, 30, false, false, 1000 + id));
        let store = Arc::new(MemoryStore::with_profiles(profiles));
        let recommender = SimilarityRecommender::new(store, MissingFeaturePolicy::Exclude, 3);

        let result = recommender.recommend(1, 100).await.unwrap();
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.total_candidates, 9);
    }
}
