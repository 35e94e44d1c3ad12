use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub buyer_id: i64,
  pub listing_id: i64,
  pub amount_cents: i64,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::BuyerId",
    to = "super::user::Column::Id"
  )]
  Buyer,
  #[sea_orm(
    belongs_to = "super::listing::Entity",
    from = "Column::ListingId",
    to = "super::listing::Column::Id"
  )]
  Listing,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Buyer.def()
  }
}

impl Related<super::listing::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Listing.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
