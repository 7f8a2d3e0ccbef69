// Route exports
pub mod follows;
pub mod health;
pub mod recommendations;
pub mod reviews;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use std::sync::Arc;
use thiserror::Error;
use validator::ValidationErrors;

use crate::config::Settings;
use crate::core::{FollowGraph, ReviewGate, SimilarityRecommender, SocialError};
use crate::models::ErrorResponse;
use crate::services::{FollowStore, ProfileStore, ReviewStore, StoreHealth};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub follows: FollowGraph,
    pub reviews: ReviewGate,
    pub recommender: SimilarityRecommender,
    pub health: Arc<dyn StoreHealth>,
    pub default_recommend_limit: usize,
    pub latest_reviews_limit: usize,
}

impl AppState {
    /// Wire every component to one store
    pub fn new<S>(store: Arc<S>, settings: &Settings) -> Self
    where
        S: FollowStore + ReviewStore + ProfileStore + StoreHealth + 'static,
    {
        let follows = FollowGraph::new(store.clone());
        let reviews = ReviewGate::new(follows.clone(), store.clone());
        let recommender = SimilarityRecommender::new(
            store.clone(),
            settings.recommendation.missing_features,
            settings.recommendation.max_limit,
        );

        Self {
            follows,
            reviews,
            recommender,
            health: store,
            default_recommend_limit: settings.recommendation.default_limit,
            latest_reviews_limit: settings.reviews.latest_limit,
        }
    }
}

/// Errors surfaced by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Social(#[from] SocialError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidJson(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Social(err) => match err {
                SocialError::InvalidSelfReference(_)
                | SocialError::SelfReview(_)
                | SocialError::InvalidRating(_) => StatusCode::BAD_REQUEST,
                SocialError::NotMutuallyConnected { .. } => StatusCode::FORBIDDEN,
                SocialError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
                SocialError::DuplicateEdge { .. } => StatusCode::CONFLICT,
                SocialError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error, message) = match self {
            ApiError::Validation(errors) => ("validation_failed", errors.to_string()),
            ApiError::InvalidJson(_) => ("invalid_json", self.to_string()),
            ApiError::InvalidQuery(_) => ("invalid_query", self.to_string()),
            ApiError::Social(err @ SocialError::StorageFailure(source)) => {
                // Storage details stay in the logs
                tracing::error!("Storage failure: {}", source);
                (err.kind(), "Internal storage error".to_string())
            }
            ApiError::Social(err) => (err.kind(), err.to_string()),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error.to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::InvalidQuery(err.to_string()).into()
}

/// JSON and query extractor settings shared by the server and tests
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(follows::configure)
            .configure(reviews::configure)
            .configure(recommendations::configure),
    );
}
