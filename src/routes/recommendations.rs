use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{RecommendRequest, RecommendResponse};
use crate::routes::{ApiError, AppState};

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommend_roommates", web::post().to(recommend_roommates));
}

/// Recommend roommates with the most similar profiles
///
/// POST /api/v1/recommend_roommates
///
/// Request body:
/// ```json
/// { "user_id": 15, "limit": 5 }
/// ```
/// `limit` is optional and capped by `recommendation.max_limit`.
async fn recommend_roommates(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let limit = req.limit.unwrap_or(state.default_recommend_limit);
    let result = state.recommender.recommend(req.user_id, limit).await?;

    Ok(HttpResponse::Ok().json(RecommendResponse {
        user_id: req.user_id,
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
    }))
}
