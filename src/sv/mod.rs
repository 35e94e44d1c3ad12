pub mod achievements;
pub mod content;
pub mod market;
pub mod stats;
pub mod user;

pub use achievements::Achievements;
pub use content::Content;
pub use market::Market;
pub use stats::Stats;
pub use user::User;

#[cfg(test)]
pub(crate) mod testing {
  use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema,
  };

  use crate::entity::*;

  /// In-memory sqlite with the full schema, tables derived from entities.
  /// Parents before children so foreign keys resolve.
  pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);

    let stmts = [
      schema.create_table_from_entity(user::Entity),
      schema.create_table_from_entity(post::Entity),
      schema.create_table_from_entity(comment::Entity),
      schema.create_table_from_entity(listing::Entity),
      schema.create_table_from_entity(offer::Entity),
      schema.create_table_from_entity(review::Entity),
      schema.create_table_from_entity(conversation::Entity),
      schema.create_table_from_entity(achievement::Entity),
      schema.create_table_from_entity(user_achievement::Entity),
    ];
    for stmt in stmts {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }
}
