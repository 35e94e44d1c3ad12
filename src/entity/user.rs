use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  #[sea_orm(unique)]
  pub email: String,
  pub username: String,
  pub name: Option<String>,
  pub first_name: Option<String>,
  pub bio: Option<String>,
  pub avatar_url: Option<String>,
  pub is_admin: bool,
  pub total_xp: i64,
  pub login_count: i64,
  pub login_streak: i64,
  pub last_login_at: Option<NaiveDateTime>,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::post::Entity")]
  Posts,
  #[sea_orm(has_many = "super::comment::Entity")]
  Comments,
  #[sea_orm(has_many = "super::listing::Entity")]
  Listings,
  #[sea_orm(has_many = "super::offer::Entity")]
  Offers,
  #[sea_orm(has_many = "super::review::Entity")]
  Reviews,
  #[sea_orm(has_many = "super::user_achievement::Entity")]
  UserAchievements,
}

impl Related<super::post::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Posts.def()
  }
}

impl Related<super::user_achievement::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::UserAchievements.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
