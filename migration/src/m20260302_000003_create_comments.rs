use sea_orm_migration::prelude::*;

use super::m20260302_000001_create_users::Users;
use super::m20260302_000002_create_posts::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Comments::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Comments::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Comments::AuthorId).big_integer().not_null())
          .col(ColumnDef::new(Comments::PostId).big_integer().not_null())
          .col(ColumnDef::new(Comments::Body).text().not_null())
          .col(ColumnDef::new(Comments::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_comments_author")
              .from(Comments::Table, Comments::AuthorId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_comments_post")
              .from(Comments::Table, Comments::PostId)
              .to(Posts::Table, Posts::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Comments::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Comments {
  Table,
  Id,
  AuthorId,
  PostId,
  Body,
  CreatedAt,
}
