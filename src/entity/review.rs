use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub reviewer_id: i64,
  pub listing_id: i64,
  pub rating: i32,
  pub body: String,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::ReviewerId",
    to = "super::user::Column::Id"
  )]
  Reviewer,
  #[sea_orm(
    belongs_to = "super::listing::Entity",
    from = "Column::ListingId",
    to = "super::listing::Column::Id"
  )]
  Listing,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Reviewer.def()
  }
}

impl Related<super::listing::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Listing.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
