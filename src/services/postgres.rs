use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{FollowEdge, NewReview, Profile, Rating, Review, UserId};
use crate::services::store::{FollowStore, ProfileStore, ReviewStore, StoreError, StoreHealth};

/// Pool options read from configuration
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// PostgreSQL-backed store for follows, reviews and profiles
///
/// Edge invariants are enforced twice: by the engine before the call and by
/// the `follows` table constraints.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect, then run pending migrations
    pub async fn connect(database_url: &str, options: PoolOptions) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .acquire_timeout(options.acquire_timeout)
            .idle_timeout(options.idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }
}

fn review_from_row(row: &PgRow) -> Result<Review, StoreError> {
    let rating: i16 = row.try_get("rating")?;
    let rating = Rating::new(rating as i64)
        .map_err(|_| StoreError::InvalidData(format!("rating {} out of range", rating)))?;

    Ok(Review {
        review_id: row.try_get("review_id")?,
        reviewer_id: row.try_get("reviewer_id")?,
        reviewee_id: row.try_get("reviewee_id")?,
        rating,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

fn profile_from_row(row: &PgRow) -> Result<Profile, StoreError> {
    Ok(Profile {
        user_id: row.try_get("user_id")?,
        age: row.try_get("age")?,
        is_smoking: row.try_get("is_smoking")?,
        snoring: row.try_get("snoring")?,
        budget: row.try_get("budget")?,
        photo_url: row.try_get("photo_url")?,
        introduction: row.try_get("introduction")?,
        preferred_region: row.try_get("preferred_region")?,
    })
}

const PROFILE_COLUMNS: &str =
    "user_id, age, is_smoking, snoring, budget, photo_url, introduction, preferred_region";

const REVIEW_COLUMNS: &str = "review_id, reviewer_id, reviewee_id, rating, content, created_at";

#[async_trait]
impl FollowStore for PostgresStore {
    /// Uses INSERT ... ON CONFLICT DO NOTHING so the duplicate check and the
    /// insert are one statement.
    async fn insert_edge(&self, edge: &FollowEdge) -> Result<bool, StoreError> {
        let query = r#"
            INSERT INTO follows (follower_id, following_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, following_id) DO NOTHING
        "#;

        let result = sqlx::query(query)
            .bind(edge.follower_id)
            .bind(edge.following_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_edge(&self, edge: &FollowEdge) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM follows
            WHERE follower_id = $1 AND following_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(edge.follower_id)
            .bind(edge.following_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_mutual(&self, a: UserId, b: UserId) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1
                FROM follows f1
                JOIN follows f2
                  ON f1.follower_id = f2.following_id
                 AND f1.following_id = f2.follower_id
                WHERE f1.follower_id = $1 AND f1.following_id = $2
            ) AS mutual
        "#;

        let row = sqlx::query(query)
            .bind(a)
            .bind(b)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("mutual")?)
    }

    async fn following(&self, follower_id: UserId) -> Result<Vec<UserId>, StoreError> {
        let query = r#"
            SELECT following_id
            FROM follows
            WHERE follower_id = $1
            ORDER BY following_id
        "#;

        let rows = sqlx::query(query)
            .bind(follower_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get("following_id").map_err(Into::into))
            .collect()
    }

    async fn followers(&self, following_id: UserId) -> Result<Vec<UserId>, StoreError> {
        let query = r#"
            SELECT follower_id
            FROM follows
            WHERE following_id = $1
            ORDER BY follower_id
        "#;

        let rows = sqlx::query(query)
            .bind(following_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get("follower_id").map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl ReviewStore for PostgresStore {
    /// Locks both edge rows with FOR SHARE so a concurrent unfollow waits
    /// until the review has committed or rolled back.
    async fn insert_review_if_mutual(
        &self,
        review: &NewReview,
    ) -> Result<Option<Review>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let mutual_query = r#"
            SELECT f1.follow_id
            FROM follows f1
            JOIN follows f2
              ON f1.follower_id = f2.following_id
             AND f1.following_id = f2.follower_id
            WHERE f1.follower_id = $1 AND f1.following_id = $2
            FOR SHARE
        "#;

        let edge = review.edge();
        let mutual = sqlx::query(mutual_query)
            .bind(edge.follower_id)
            .bind(edge.following_id)
            .fetch_optional(&mut *tx)
            .await?;

        if mutual.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let insert_query = format!(
            r#"
            INSERT INTO reviews (reviewer_id, reviewee_id, rating, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        );

        let row = sqlx::query(&insert_query)
            .bind(review.reviewer_id)
            .bind(review.reviewee_id)
            .bind(review.rating.value() as i16)
            .bind(&review.content)
            .fetch_one(&mut *tx)
            .await?;

        let stored = review_from_row(&row)?;
        tx.commit().await?;

        Ok(Some(stored))
    }

    async fn reviews_for(&self, reviewee_id: UserId) -> Result<Vec<Review>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM reviews
            WHERE reviewee_id = $1
            ORDER BY created_at DESC, review_id DESC
            "#,
            REVIEW_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(reviewee_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(review_from_row).collect()
    }

    async fn latest_reviews(&self, limit: usize) -> Result<Vec<Review>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM reviews
            ORDER BY created_at DESC, review_id DESC
            LIMIT $1
            "#,
            REVIEW_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(review_from_row).collect()
    }
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        let query = format!(
            "SELECT {} FROM user_profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn candidate_profiles(
        &self,
        exclude_user_id: UserId,
    ) -> Result<Vec<Profile>, StoreError> {
        let query = format!(
            "SELECT {} FROM user_profiles WHERE user_id <> $1",
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(exclude_user_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            "Loaded {} candidate profiles (excluding {})",
            rows.len(),
            exclude_user_id
        );

        rows.iter().map(profile_from_row).collect()
    }
}

#[async_trait]
impl StoreHealth for PostgresStore {
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
