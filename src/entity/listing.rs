use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listings")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub seller_id: i64,
  pub title: String,
  pub description: String,
  pub price_cents: i64,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::SellerId",
    to = "super::user::Column::Id"
  )]
  Seller,
  #[sea_orm(has_many = "super::offer::Entity")]
  Offers,
  #[sea_orm(has_many = "super::review::Entity")]
  Reviews,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Seller.def()
  }
}

impl Related<super::offer::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Offers.def()
  }
}

impl Related<super::review::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Reviews.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
