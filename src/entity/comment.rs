use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub author_id: i64,
  pub post_id: i64,
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
  #[sea_orm(
    belongs_to = "super::post::Entity",
    from = "Column::PostId",
    to = "super::post::Column::Id"
  )]
  Post,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Author.def()
  }
}

impl Related<super::post::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Post.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
