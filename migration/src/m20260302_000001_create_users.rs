use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Users::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Users::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
          .col(ColumnDef::new(Users::Username).string().not_null())
          .col(ColumnDef::new(Users::Name).string().null())
          .col(ColumnDef::new(Users::FirstName).string().null())
          .col(ColumnDef::new(Users::Bio).text().null())
          .col(ColumnDef::new(Users::AvatarUrl).string().null())
          .col(
            ColumnDef::new(Users::IsAdmin)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(Users::TotalXp)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Users::LoginCount)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Users::LoginStreak)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Users::LastLoginAt).date_time().null())
          .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Users {
  Table,
  Id,
  Email,
  Username,
  Name,
  FirstName,
  Bio,
  AvatarUrl,
  IsAdmin,
  TotalXp,
  LoginCount,
  LoginStreak,
  LastLoginAt,
  CreatedAt,
}
