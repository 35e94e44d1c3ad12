use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub author_id: i64,
  pub title: String,
  pub body: String,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::AuthorId",
    to = "super::user::Column::Id"
  )]
  Author,
  #[sea_orm(has_many = "super::comment::Entity")]
  Comments,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Author.def()
  }
}

impl Related<super::comment::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Comments.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
