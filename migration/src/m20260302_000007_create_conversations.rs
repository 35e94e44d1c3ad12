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
          .table(Conversations::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Conversations::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Conversations::StarterId)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(Conversations::RecipientId)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(Conversations::Subject).string().null())
          .col(
            ColumnDef::new(Conversations::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_conversations_starter")
              .from(Conversations::Table, Conversations::StarterId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_conversations_recipient")
              .from(Conversations::Table, Conversations::RecipientId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Conversations::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Conversations {
  Table,
  Id,
  StarterId,
  RecipientId,
  Subject,
  CreatedAt,
}
