use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conversations")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub starter_id: i64,
  pub recipient_id: i64,
  pub subject: Option<String>,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::StarterId",
    to = "super::user::Column::Id"
  )]
  Starter,
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::RecipientId",
    to = "super::user::Column::Id"
  )]
  Recipient,
}

impl ActiveModelBehavior for ActiveModel {}
