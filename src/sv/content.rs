use crate::{
  entity::{comment, conversation, post, user},
  prelude::*,
};

/// Blog posts, comments and conversations.
pub struct Content<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Content<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create_post(
    &self,
    author_id: i64,
    title: String,
    body: String,
  ) -> Result<post::Model> {
    let now = Utc::now().naive_utc();

    let post = post::ActiveModel {
      id: NotSet,
      author_id: Set(author_id),
      title: Set(title),
      body: Set(body),
      created_at: Set(now),
    };

    Ok(post.insert(self.db).await?)
  }

  pub async fn create_comment(
    &self,
    author_id: i64,
    post_id: i64,
    body: String,
  ) -> Result<comment::Model> {
    post::Entity::find_by_id(post_id)
      .one(self.db)
      .await?
      .ok_or(Error::PostNotFound)?;

    let now = Utc::now().naive_utc();

    let comment = comment::ActiveModel {
      id: NotSet,
      author_id: Set(author_id),
      post_id: Set(post_id),
      body: Set(body),
      created_at: Set(now),
    };

    Ok(comment.insert(self.db).await?)
  }

  pub async fn start_conversation(
    &self,
    starter_id: i64,
    recipient_id: i64,
    subject: Option<String>,
  ) -> Result<conversation::Model> {
    user::Entity::find_by_id(recipient_id)
      .one(self.db)
      .await?
      .ok_or(Error::UserNotFound)?;

    let now = Utc::now().naive_utc();

    let conversation = conversation::ActiveModel {
      id: NotSet,
      starter_id: Set(starter_id),
      recipient_id: Set(recipient_id),
      subject: Set(subject),
      created_at: Set(now),
    };

    Ok(conversation.insert(self.db).await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::setup_test_db;
  use crate::sv::User;

  #[tokio::test]
  async fn comment_requires_existing_post() {
    let db = setup_test_db().await;
    let user =
      User::new(&db).get_or_create("a@example.com", "a", false).await.unwrap();

    let result =
      Content::new(&db).create_comment(user.id, 999, "hi".into()).await;
    assert!(matches!(result, Err(Error::PostNotFound)));
  }

  #[tokio::test]
  async fn conversation_requires_existing_recipient() {
    let db = setup_test_db().await;
    let user =
      User::new(&db).get_or_create("a@example.com", "a", false).await.unwrap();

    let result =
      Content::new(&db).start_conversation(user.id, 999, None).await;
    assert!(matches!(result, Err(Error::UserNotFound)));
  }
}
