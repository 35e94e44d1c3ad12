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
          .table(Listings::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Listings::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Listings::SellerId).big_integer().not_null())
          .col(ColumnDef::new(Listings::Title).string().not_null())
          .col(ColumnDef::new(Listings::Description).text().not_null())
          .col(
            ColumnDef::new(Listings::PriceCents).big_integer().not_null(),
          )
          .col(ColumnDef::new(Listings::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_listings_seller")
              .from(Listings::Table, Listings::SellerId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Listings::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Listings {
  Table,
  Id,
  SellerId,
  Title,
  Description,
  PriceCents,
  CreatedAt,
}
