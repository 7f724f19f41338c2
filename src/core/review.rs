//! Peer review business logic.
//!
//! Residents rate each other after shared rotations. Ratings are 1 to 5;
//! a resident cannot review themselves.

use crate::{
    entities::{Review, Rotation, review},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a peer review, performing input validation.
pub async fn create_review(
    db: &DatabaseConnection,
    reviewer_id: &str,
    reviewee_id: &str,
    rotation_id: Option<i64>,
    rating: i32,
    comments: Option<String>,
) -> Result<review::Model> {
    if !(1..=5).contains(&rating) {
        return Err(Error::InvalidRating { rating });
    }

    if reviewer_id == reviewee_id {
        return Err(Error::Config {
            message: "A resident cannot review themselves".to_string(),
        });
    }

    if let Some(id) = rotation_id {
        Rotation::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::RotationNotFound { id })?;
    }

    let model = review::ActiveModel {
        reviewer_id: Set(reviewer_id.to_string()),
        reviewee_id: Set(reviewee_id.to_string()),
        rotation_id: Set(rotation_id),
        rating: Set(rating),
        comments: Set(comments),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all reviews received by a resident, newest first.
pub async fn get_reviews_for_reviewee(
    db: &DatabaseConnection,
    reviewee_id: &str,
) -> Result<Vec<review::Model>> {
    Review::find()
        .filter(review::Column::RevieweeId.eq(reviewee_id))
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a resident's received reviews joined with the rotation each
/// one refers to, newest first. Reviews without a rotation pair with None.
pub async fn get_reviews_with_rotations(
    db: &DatabaseConnection,
    reviewee_id: &str,
) -> Result<Vec<(review::Model, Option<crate::entities::rotation::Model>)>> {
    Review::find()
        .find_also_related(Rotation)
        .filter(review::Column::RevieweeId.eq(reviewee_id))
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Mean rating over a set of reviews, None when there are none.
#[must_use]
pub fn average_rating(reviews: &[review::Model]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }

    let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    #[allow(clippy::cast_precision_loss)]
    Some(sum as f64 / reviews.len() as f64)
}

/// Mean rating received by a resident, None when they have no reviews.
pub async fn average_rating_for(db: &DatabaseConnection, reviewee_id: &str) -> Result<Option<f64>> {
    let reviews = get_reviews_for_reviewee(db, reviewee_id).await?;
    Ok(average_rating(&reviews))
}

/// Deletes a review.
pub async fn delete_review(db: &DatabaseConnection, review_id: i64) -> Result<()> {
    let existing = Review::find_by_id(review_id)
        .one(db)
        .await?
        .ok_or(Error::ReviewNotFound { id: review_id })?;
    existing.delete(db).await?;
    Ok(())
}
