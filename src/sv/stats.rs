use serde::Serialize;

use crate::{
  entity::{comment, conversation, listing, offer, post, review, user},
  prelude::*,
};

/// Aggregate activity counters for one user, computed fresh per call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
  pub posts_authored: i64,
  pub comments_posted: i64,
  pub listings_created: i64,
  pub offers_made: i64,
  pub reviews_left: i64,
  pub conversations_started: i64,
  pub login_count: i64,
  pub login_streak: i64,
  /// 0..=100 in 25-point increments
  pub profile_completion: i64,
}

/// Completeness of name / first name / bio / avatar, 25 points each.
pub fn profile_completion(user: &user::Model) -> i64 {
  let fields =
    [&user.name, &user.first_name, &user.bio, &user.avatar_url];
  let filled = fields
    .iter()
    .filter(|field| field.as_deref().is_some_and(|s| !s.trim().is_empty()))
    .count();
  25 * filled as i64
}

pub struct Stats<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Stats<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Snapshot the user's counters. The count queries are independent and
  /// run concurrently; any failing query fails the whole snapshot rather
  /// than reporting a false zero. A missing user yields zeroed counters.
  pub async fn snapshot(&self, user_id: i64) -> Result<Snapshot> {
    let (user, posts, comments, listings, offers, reviews, conversations) =
      tokio::try_join!(
        user::Entity::find_by_id(user_id).one(self.db),
        post::Entity::find()
          .filter(post::Column::AuthorId.eq(user_id))
          .count(self.db),
        comment::Entity::find()
          .filter(comment::Column::AuthorId.eq(user_id))
          .count(self.db),
        listing::Entity::find()
          .filter(listing::Column::SellerId.eq(user_id))
          .count(self.db),
        offer::Entity::find()
          .filter(offer::Column::BuyerId.eq(user_id))
          .count(self.db),
        review::Entity::find()
          .filter(review::Column::ReviewerId.eq(user_id))
          .count(self.db),
        conversation::Entity::find()
          .filter(conversation::Column::StarterId.eq(user_id))
          .count(self.db),
      )?;

    let (completion, login_count, login_streak) = match &user {
      Some(user) => {
        (profile_completion(user), user.login_count, user.login_streak)
      }
      None => (0, 0, 0),
    };

    Ok(Snapshot {
      posts_authored: posts as i64,
      comments_posted: comments as i64,
      listings_created: listings as i64,
      offers_made: offers as i64,
      reviews_left: reviews as i64,
      conversations_started: conversations as i64,
      login_count,
      login_streak,
      profile_completion: completion,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::setup_test_db;
  use crate::sv::user::ProfileUpdate;
  use crate::sv::{Content, Market, User};

  #[tokio::test]
  async fn snapshot_counts_activity() {
    let db = setup_test_db().await;

    let author =
      User::new(&db).get_or_create("a@example.com", "a", false).await.unwrap();
    let peer =
      User::new(&db).get_or_create("b@example.com", "b", false).await.unwrap();

    let content = Content::new(&db);
    let market = Market::new(&db);

    let post = content
      .create_post(author.id, "hello".into(), "first".into())
      .await
      .unwrap();
    content
      .create_post(author.id, "again".into(), "second".into())
      .await
      .unwrap();
    content
      .create_comment(peer.id, post.id, "nice".into())
      .await
      .unwrap();

    let listing = market
      .create_listing(author.id, "lamp".into(), "a lamp".into(), 2500)
      .await
      .unwrap();
    market.create_offer(peer.id, listing.id, 2000).await.unwrap();
    market
      .create_review(peer.id, listing.id, 5, "bright".into())
      .await
      .unwrap();
    content
      .start_conversation(author.id, peer.id, Some("hi".into()))
      .await
      .unwrap();

    let stats = Stats::new(&db).snapshot(author.id).await.unwrap();
    assert_eq!(stats.posts_authored, 2);
    assert_eq!(stats.comments_posted, 0);
    assert_eq!(stats.listings_created, 1);
    assert_eq!(stats.conversations_started, 1);

    let stats = Stats::new(&db).snapshot(peer.id).await.unwrap();
    assert_eq!(stats.posts_authored, 0);
    assert_eq!(stats.comments_posted, 1);
    assert_eq!(stats.offers_made, 1);
    assert_eq!(stats.reviews_left, 1);
  }

  #[tokio::test]
  async fn missing_user_degrades_to_zeroes() {
    let db = setup_test_db().await;

    let stats = Stats::new(&db).snapshot(4242).await.unwrap();
    assert_eq!(stats, Snapshot::default());
  }

  #[tokio::test]
  async fn profile_completion_in_quarter_steps() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    let user = sv.get_or_create("kay@example.com", "kay", false).await.unwrap();
    assert_eq!(profile_completion(&user), 0);

    let user = sv
      .update_profile(
        user,
        ProfileUpdate { name: Some("Kay".into()), ..Default::default() },
      )
      .await
      .unwrap();
    assert_eq!(profile_completion(&user), 25);

    let user = sv
      .update_profile(
        user,
        ProfileUpdate {
          first_name: Some("Kay".into()),
          bio: Some("hi".into()),
          avatar_url: Some("https://cdn.example.com/kay.png".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap();
    assert_eq!(profile_completion(&user), 100);
  }

  #[tokio::test]
  async fn blank_profile_fields_do_not_count() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    let user = sv.get_or_create("kay@example.com", "kay", false).await.unwrap();
    let user = sv
      .update_profile(
        user,
        ProfileUpdate { name: Some("   ".into()), ..Default::default() },
      )
      .await
      .unwrap();
    assert_eq!(profile_completion(&user), 0);
  }
}
