use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Achievement category enum
#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Category {
  #[sea_orm(string_value = "contribution")]
  Contribution,
  #[sea_orm(string_value = "marketplace")]
  Marketplace,
  #[sea_orm(string_value = "social")]
  Social,
  #[sea_orm(string_value = "engagement")]
  Engagement,
  #[sea_orm(string_value = "special")]
  Special,
}

impl Category {
  /// Display ordering used by the achievement overview.
  pub fn rank(self) -> u8 {
    match self {
      Self::Contribution => 0,
      Self::Marketplace => 1,
      Self::Social => 2,
      Self::Engagement => 3,
      Self::Special => 4,
    }
  }
}

/// Achievement tier enum, ordered bronze < silver < gold < legendary
#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  #[sea_orm(string_value = "bronze")]
  Bronze,
  #[sea_orm(string_value = "silver")]
  Silver,
  #[sea_orm(string_value = "gold")]
  Gold,
  #[sea_orm(string_value = "legendary")]
  Legendary,
}

impl Tier {
  pub fn rank(self) -> u8 {
    match self {
      Self::Bronze => 0,
      Self::Silver => 1,
      Self::Gold => 2,
      Self::Legendary => 3,
    }
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "achievements")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub code: String,
  pub name: String,
  pub description: String,
  pub icon: String,
  pub category: Category,
  pub tier: Tier,
  pub xp: i32,
  /// serialized `catalog::Requirement`
  pub requirements: Json,
  pub is_visible: bool,
  pub unlock_count: i64,
  pub created_by: i64,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::CreatedBy",
    to = "super::user::Column::Id"
  )]
  CreatedBy,
  #[sea_orm(has_many = "super::user_achievement::Entity")]
  UserAchievements,
}

impl Related<super::user_achievement::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::UserAchievements.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
