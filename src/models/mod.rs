// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    FollowEdge, MissingFeaturePolicy, NewReview, Profile, Rating, Review, ScoredProfile,
    UnfollowOutcome, UserId,
};
pub use requests::{
    CreateReviewRequest, FollowRequest, FollowersQuery, FollowingQuery, MutualQuery,
    RecommendRequest,
};
pub use responses::{
    CreateReviewResponse, ErrorResponse, FollowResponse, FollowersResponse, FollowingResponse,
    HealthResponse, MutualResponse, RecommendResponse, ReviewListResponse, UnfollowResponse,
};
