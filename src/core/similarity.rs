use crate::models::{MissingFeaturePolicy, Profile};

/// Number of features compared between profiles
pub const FEATURE_COUNT: usize = 4;

/// Raw feature vector: `[age, is_smoking, snoring, budget]`
///
/// Booleans become 0/1. No scaling is applied, so `budget` dominates the
/// angle for typical values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build a vector from the target profile; missing values count as zero
    pub fn for_target(profile: &Profile) -> Self {
        Self([
            profile.age.unwrap_or(0) as f64,
            flag(profile.is_smoking),
            flag(profile.snoring),
            profile.budget.unwrap_or(0) as f64,
        ])
    }

    /// Build a vector for a candidate, or `None` if the policy excludes it
    pub fn for_candidate(profile: &Profile, policy: MissingFeaturePolicy) -> Option<Self> {
        match policy {
            MissingFeaturePolicy::Exclude if !profile.has_complete_features() => None,
            _ => Some(Self::for_target(profile)),
        }
    }

    #[inline]
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

#[inline]
fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Cosine similarity `(u . v) / (|u| |v|)`
///
/// A zero-norm vector on either side yields 0.0 instead of NaN. Any other
/// non-finite result (overflowing inputs) also collapses to 0.0.
#[inline]
pub fn cosine_similarity(u: &FeatureVector, v: &FeatureVector) -> f64 {
    let norm_u = u.norm();
    let norm_v = v.norm();
    if norm_u == 0.0 || norm_v == 0.0 {
        return 0.0;
    }

    let similarity = u.dot(v) / (norm_u * norm_v);
    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(age: f64, smoking: f64, snoring: f64, budget: f64) -> FeatureVector {
        FeatureVector([age, smoking, snoring, budget])
    }

    #[test]
    fn test_identical_vectors() {
        let v = vector(30.0, 0.0, 0.0, 1000.0);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_is_zero_similarity() {
        let zero = vector(0.0, 0.0, 0.0, 0.0);
        let other = vector(25.0, 1.0, 0.0, 500.0);
        assert_eq!(cosine_similarity(&zero, &other), 0.0);
        assert_eq!(cosine_similarity(&other, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let a = vector(1.0, 0.0, 0.0, 0.0);
        let b = vector(0.0, 0.0, 0.0, 1.0);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_budget_dominates() {
        // Very different lifestyle, same budget: still nearly parallel
        let target = vector(30.0, 0.0, 0.0, 100_000.0);
        let candidate = vector(60.0, 1.0, 1.0, 100_000.0);
        assert!(cosine_similarity(&target, &candidate) > 0.999);
    }

    #[test]
    fn test_overflow_collapses_to_zero() {
        let huge = vector(f64::MAX, 0.0, 0.0, f64::MAX);
        let similarity = cosine_similarity(&huge, &huge);
        assert!(similarity.is_finite());
    }

    #[test]
    fn test_candidate_policy() {
        let mut profile = Profile::with_features(2, 30, true, false, 800);
        profile.budget = None;

        assert!(FeatureVector::for_candidate(&profile, MissingFeaturePolicy::Exclude).is_none());
        assert_eq!(
            FeatureVector::for_candidate(&profile, MissingFeaturePolicy::ZeroFill),
            Some(vector(30.0, 1.0, 0.0, 0.0))
        );
        assert_eq!(
            FeatureVector::for_target(&profile),
            vector(30.0, 1.0, 0.0, 0.0)
        );
    }
}
