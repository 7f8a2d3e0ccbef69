use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{
    CreateReviewRequest, CreateReviewResponse, Rating, ReviewListResponse, UserId,
};
use crate::routes::{ApiError, AppState};

/// Configure review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/review", web::post().to(create_review))
        .route("/reviews", web::get().to(latest_reviews))
        .route("/users/{user_id}/reviews", web::get().to(reviews_for_user));
}

/// Write a review for a mutually followed user
///
/// POST /api/v1/review
///
/// Request body:
/// ```json
/// { "reviewer_id": 1, "reviewee_id": 2, "rating": 5, "content": "Great roommate!" }
/// ```
async fn create_review(
    state: web::Data<AppState>,
    req: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let CreateReviewRequest {
        reviewer_id,
        reviewee_id,
        rating,
        content,
    } = req.into_inner();
    let rating = Rating::from_json(&rating)?;

    let review = state
        .reviews
        .create_review(reviewer_id, reviewee_id, rating.into(), content)
        .await?;

    Ok(HttpResponse::Created().json(CreateReviewResponse {
        success: true,
        review,
    }))
}

/// Newest reviews across the site
///
/// GET /api/v1/reviews
async fn latest_reviews(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let reviews = state
        .reviews
        .latest_reviews(state.latest_reviews_limit)
        .await?;

    Ok(HttpResponse::Ok().json(ReviewListResponse { reviews }))
}

/// GET /api/v1/users/{user_id}/reviews
async fn reviews_for_user(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, ApiError> {
    let reviews = state.reviews.reviews_for(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ReviewListResponse { reviews }))
}
