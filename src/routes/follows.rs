use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{
    FollowRequest, FollowResponse, FollowersQuery, FollowersResponse, FollowingQuery,
    FollowingResponse, MutualQuery, MutualResponse, UnfollowResponse,
};
use crate::routes::{ApiError, AppState};

/// Configure follow graph routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/follow", web::post().to(follow))
        .route("/unfollow", web::post().to(unfollow))
        .route("/following", web::get().to(list_following))
        .route("/following", web::post().to(list_following_body))
        .route("/followers", web::get().to(list_followers))
        .route("/follows/mutual", web::get().to(mutual_status));
}

/// Follow a user
///
/// POST /api/v1/follow
///
/// Request body:
/// ```json
/// { "follower_id": 1, "following_id": 2 }
/// ```
async fn follow(
    state: web::Data<AppState>,
    req: web::Json<FollowRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let edge = state.follows.follow(req.follower_id, req.following_id).await?;

    Ok(HttpResponse::Created().json(FollowResponse {
        success: true,
        follower_id: edge.follower_id,
        following_id: edge.following_id,
    }))
}

/// Unfollow a user; succeeds whether or not the edge existed
///
/// POST /api/v1/unfollow
async fn unfollow(
    state: web::Data<AppState>,
    req: web::Json<FollowRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let outcome = state
        .follows
        .unfollow(req.follower_id, req.following_id)
        .await?;

    Ok(HttpResponse::Ok().json(UnfollowResponse {
        success: true,
        follower_id: req.follower_id,
        following_id: req.following_id,
        outcome,
    }))
}

/// GET /api/v1/following?follower_id={id}
async fn list_following(
    state: web::Data<AppState>,
    query: web::Query<FollowingQuery>,
) -> Result<HttpResponse, ApiError> {
    following_response(&state, query.into_inner()).await
}

/// Same listing with the id in a JSON body
///
/// POST /api/v1/following
///
/// Request body:
/// ```json
/// { "follower_id": 1 }
/// ```
async fn list_following_body(
    state: web::Data<AppState>,
    req: web::Json<FollowingQuery>,
) -> Result<HttpResponse, ApiError> {
    following_response(&state, req.into_inner()).await
}

async fn following_response(
    state: &AppState,
    query: FollowingQuery,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let following_ids = state.follows.list_following(query.follower_id).await?;

    Ok(HttpResponse::Ok().json(FollowingResponse {
        follower_id: query.follower_id,
        following_ids,
    }))
}

/// GET /api/v1/followers?following_id={id}
async fn list_followers(
    state: web::Data<AppState>,
    query: web::Query<FollowersQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let follower_ids = state.follows.list_followers(query.following_id).await?;

    Ok(HttpResponse::Ok().json(FollowersResponse {
        following_id: query.following_id,
        follower_ids,
    }))
}

/// GET /api/v1/follows/mutual?a={id}&b={id}
async fn mutual_status(
    state: web::Data<AppState>,
    query: web::Query<MutualQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let mutual = state.follows.is_mutual(query.a, query.b).await?;

    Ok(HttpResponse::Ok().json(MutualResponse {
        a: query.a,
        b: query.b,
        mutual,
    }))
}
