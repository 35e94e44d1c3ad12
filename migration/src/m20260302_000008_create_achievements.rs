use sea_orm_migration::prelude::*;

use super::m20260302_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Achievements::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Achievements::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Achievements::Code)
              .string()
              .not_null()
              .unique_key(),
          )
          .col(ColumnDef::new(Achievements::Name).string().not_null())
          .col(ColumnDef::new(Achievements::Description).text().not_null())
          .col(ColumnDef::new(Achievements::Icon).string().not_null())
          .col(ColumnDef::new(Achievements::Category).text().not_null())
          .col(ColumnDef::new(Achievements::Tier).text().not_null())
          .col(ColumnDef::new(Achievements::Xp).integer().not_null())
          .col(
            ColumnDef::new(Achievements::Requirements).json().not_null(),
          )
          .col(
            ColumnDef::new(Achievements::IsVisible)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(
            ColumnDef::new(Achievements::UnlockCount)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Achievements::CreatedBy).big_integer().not_null(),
          )
          .col(
            ColumnDef::new(Achievements::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_achievements_created_by")
              .from(Achievements::Table, Achievements::CreatedBy)
              .to(Users::Table, Users::Id),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Achievements::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Achievements {
  Table,
  Id,
  Code,
  Name,
  Description,
  Icon,
  Category,
  Tier,
  Xp,
  Requirements,
  IsVisible,
  UnlockCount,
  CreatedBy,
  CreatedAt,
}
