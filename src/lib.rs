//! Roommate Match - social graph and roommate recommendation service
//!
//! The library holds the follow graph, the mutual-follow review gate and the
//! cosine-similarity roommate recommender, plus the storage backends and
//! HTTP routes that expose them.

pub mod config;
pub mod core;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{cosine_similarity, FollowGraph, ReviewGate, SimilarityRecommender, SocialError};
pub use models::{FollowEdge, Profile, Rating, Review, ScoredProfile, UnfollowOutcome, UserId};
pub use services::{MemoryStore, PostgresStore};
