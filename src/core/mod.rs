// Core engine exports
pub mod error;
pub mod follow_graph;
pub mod recommender;
pub mod review_gate;
pub mod similarity;

pub use error::SocialError;
pub use follow_graph::FollowGraph;
pub use recommender::{rank_candidates, RecommendationResult, SimilarityRecommender};
pub use review_gate::ReviewGate;
pub use similarity::{cosine_similarity, FeatureVector};
