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
          .table(Offers::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Offers::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Offers::BuyerId).big_integer().not_null())
          .col(ColumnDef::new(Offers::ListingId).big_integer().not_null())
          .col(ColumnDef::new(Offers::AmountCents).big_integer().not_null())
          .col(ColumnDef::new(Offers::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_offers_buyer")
              .from(Offers::Table, Offers::BuyerId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_offers_listing")
              .from(Offers::Table, Offers::ListingId)
              .to(Listings::Table, Listings::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Offers::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Offers {
  Table,
  Id,
  BuyerId,
  ListingId,
  AmountCents,
  CreatedAt,
}
