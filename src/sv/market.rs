use crate::{
  entity::{listing, offer, review},
  prelude::*,
};

/// Marketplace listings, offers and reviews.
pub struct Market<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Market<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create_listing(
    &self,
    seller_id: i64,
    title: String,
    description: String,
    price_cents: i64,
  ) -> Result<listing::Model> {
    let now = Utc::now().naive_utc();

    let listing = listing::ActiveModel {
      id: NotSet,
      seller_id: Set(seller_id),
      title: Set(title),
      description: Set(description),
      price_cents: Set(price_cents),
      created_at: Set(now),
    };

    Ok(listing.insert(self.db).await?)
  }

  pub async fn create_offer(
    &self,
    buyer_id: i64,
    listing_id: i64,
    amount_cents: i64,
  ) -> Result<offer::Model> {
    listing::Entity::find_by_id(listing_id)
      .one(self.db)
      .await?
      .ok_or(Error::ListingNotFound)?;

    let now = Utc::now().naive_utc();

    let offer = offer::ActiveModel {
      id: NotSet,
      buyer_id: Set(buyer_id),
      listing_id: Set(listing_id),
      amount_cents: Set(amount_cents),
      created_at: Set(now),
    };

    Ok(offer.insert(self.db).await?)
  }

  pub async fn create_review(
    &self,
    reviewer_id: i64,
    listing_id: i64,
    rating: i32,
    body: String,
  ) -> Result<review::Model> {
    listing::Entity::find_by_id(listing_id)
      .one(self.db)
      .await?
      .ok_or(Error::ListingNotFound)?;

    let rating = rating.clamp(1, 5);
    let now = Utc::now().naive_utc();

    let review = review::ActiveModel {
      id: NotSet,
      reviewer_id: Set(reviewer_id),
      listing_id: Set(listing_id),
      rating: Set(rating),
      body: Set(body),
      created_at: Set(now),
    };

    Ok(review.insert(self.db).await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::setup_test_db;
  use crate::sv::User;

  #[tokio::test]
  async fn offer_requires_existing_listing() {
    let db = setup_test_db().await;
    let user =
      User::new(&db).get_or_create("a@example.com", "a", false).await.unwrap();

    let result = Market::new(&db).create_offer(user.id, 999, 100).await;
    assert!(matches!(result, Err(Error::ListingNotFound)));
  }

  #[tokio::test]
  async fn review_rating_is_clamped() {
    let db = setup_test_db().await;
    let sv = Market::new(&db);
    let user =
      User::new(&db).get_or_create("a@example.com", "a", false).await.unwrap();

    let listing = sv
      .create_listing(user.id, "lamp".into(), "a lamp".into(), 2500)
      .await
      .unwrap();
    let review =
      sv.create_review(user.id, listing.id, 11, "!!".into()).await.unwrap();

    assert_eq!(review.rating, 5);
  }
}
