pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::MigratorTrait;

mod m20260302_000001_create_users;
mod m20260302_000002_create_posts;
mod m20260302_000003_create_comments;
mod m20260302_000004_create_listings;
mod m20260302_000005_create_offers;
mod m20260302_000006_create_reviews;
mod m20260302_000007_create_conversations;
mod m20260302_000008_create_achievements;
mod m20260302_000009_create_user_achievements;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260302_000001_create_users::Migration),
      Box::new(m20260302_000002_create_posts::Migration),
      Box::new(m20260302_000003_create_comments::Migration),
      Box::new(m20260302_000004_create_listings::Migration),
      Box::new(m20260302_000005_create_offers::Migration),
      Box::new(m20260302_000006_create_reviews::Migration),
      Box::new(m20260302_000007_create_conversations::Migration),
      Box::new(m20260302_000008_create_achievements::Migration),
      Box::new(m20260302_000009_create_user_achievements::Migration),
    ]
  }
}
