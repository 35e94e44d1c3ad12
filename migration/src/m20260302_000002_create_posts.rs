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
          .table(Posts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Posts::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Posts::AuthorId).big_integer().not_null())
          .col(ColumnDef::new(Posts::Title).string().not_null())
          .col(ColumnDef::new(Posts::Body).text().not_null())
          .col(ColumnDef::new(Posts::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_posts_author")
              .from(Posts::Table, Posts::AuthorId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Posts::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Posts {
  Table,
  Id,
  AuthorId,
  Title,
  Body,
  CreatedAt,
}
