use sea_orm_migration::prelude::*;

use super::m20260302_000001_create_users::Users;
use super::m20260302_000004_create_listings::Listings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Reviews::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Reviews::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Reviews::ReviewerId).big_integer().not_null())
          .col(ColumnDef::new(Reviews::ListingId).big_integer().not_null())
          .col(ColumnDef::new(Reviews::Rating).integer().not_null())
          .col(ColumnDef::new(Reviews::Body).text().not_null())
          .col(ColumnDef::new(Reviews::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_reviews_reviewer")
              .from(Reviews::Table, Reviews::ReviewerId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_reviews_listing")
              .from(Reviews::Table, Reviews::ListingId)
              .to(Listings::Table, Listings::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Reviews::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Reviews {
  Table,
  Id,
  ReviewerId,
  ListingId,
  Rating,
  Body,
  CreatedAt,
}
