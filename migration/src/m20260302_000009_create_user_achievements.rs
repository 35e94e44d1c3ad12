use sea_orm_migration::prelude::*;

use super::m20260302_000001_create_users::Users;
use super::m20260302_000008_create_achievements::Achievements;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(UserAchievements::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(UserAchievements::UserId)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(UserAchievements::AchievementId)
              .integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(UserAchievements::Progress)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(UserAchievements::MaxProgress)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(UserAchievements::UnlockedAt)
              .date_time()
              .not_null(),
          )
          // Composite primary key doubles as the uniqueness constraint
          // that resolves concurrent duplicate unlocks.
          .primary_key(
            Index::create()
              .col(UserAchievements::UserId)
              .col(UserAchievements::AchievementId),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_user_achievements_user")
              .from(UserAchievements::Table, UserAchievements::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_user_achievements_achievement")
              .from(UserAchievements::Table, UserAchievements::AchievementId)
              .to(Achievements::Table, Achievements::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(UserAchievements::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum UserAchievements {
  Table,
  UserId,
  AchievementId,
  Progress,
  MaxProgress,
  UnlockedAt,
}
