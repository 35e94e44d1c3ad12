//! Compiled-in achievement catalog.
//!
//! The catalog is the source of truth for achievement definitions; the
//! `achievements` table is seeded from it (see `sv::Achievements::seed`) and
//! existing rows are never rewritten. Requirements are typed: a metric that
//! the evaluator does not know cannot appear in a compiled definition, only
//! in hand-edited store rows, where it is skipped with a warning.

use serde::{Deserialize, Serialize};

use crate::entity::{Category, Tier};
use crate::sv::stats::Snapshot;

/// Aggregate statistic a requirement compares against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
  PostsAuthored,
  CommentsPosted,
  ListingsCreated,
  OffersMade,
  ReviewsLeft,
  ConversationsStarted,
  LoginCount,
  LoginStreak,
  ProfileCompletion,
}

impl Metric {
  pub fn value(self, stats: &Snapshot) -> i64 {
    match self {
      Self::PostsAuthored => stats.posts_authored,
      Self::CommentsPosted => stats.comments_posted,
      Self::ListingsCreated => stats.listings_created,
      Self::OffersMade => stats.offers_made,
      Self::ReviewsLeft => stats.reviews_left,
      Self::ConversationsStarted => stats.conversations_started,
      Self::LoginCount => stats.login_count,
      Self::LoginStreak => stats.login_streak,
      Self::ProfileCompletion => stats.profile_completion,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
  Eq,
  Gte,
  Lte,
  Gt,
}

impl Comparison {
  pub fn satisfied(self, value: i64, threshold: i64) -> bool {
    match self {
      Self::Eq => value == threshold,
      Self::Gte => value >= threshold,
      Self::Lte => value <= threshold,
      Self::Gt => value > threshold,
    }
  }
}

/// A single unlock rule: compare `metric` against `count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
  #[serde(rename = "type")]
  pub metric: Metric,
  #[serde(default = "default_count")]
  pub count: i64,
  #[serde(default = "default_comparison")]
  pub comparison: Comparison,
}

fn default_count() -> i64 {
  1
}

fn default_comparison() -> Comparison {
  Comparison::Gte
}

impl Requirement {
  pub const fn gte(metric: Metric, count: i64) -> Self {
    Self { metric, count, comparison: Comparison::Gte }
  }

  pub const fn eq(metric: Metric, count: i64) -> Self {
    Self { metric, count, comparison: Comparison::Eq }
  }
}

#[derive(Clone, Copy, Debug)]
pub struct AchievementDef {
  pub code: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub icon: &'static str,
  pub category: Category,
  pub tier: Tier,
  pub xp: i32,
  pub requirement: Requirement,
}

use self::Metric::*;
use crate::entity::Category::{
  Contribution, Engagement, Marketplace, Social, Special,
};
use crate::entity::Tier::{Bronze, Gold, Legendary, Silver};

pub static CATALOG: &[AchievementDef] = &[
  AchievementDef {
    code: "FIRST_BLOG_POST",
    name: "First Words",
    description: "Publish your first blog post",
    icon: "quill",
    category: Contribution,
    tier: Bronze,
    xp: 50,
    requirement: Requirement::gte(PostsAuthored, 1),
  },
  AchievementDef {
    code: "BLOG_POST_10",
    name: "Columnist",
    description: "Publish 10 blog posts",
    icon: "newspaper",
    category: Contribution,
    tier: Silver,
    xp: 150,
    requirement: Requirement::gte(PostsAuthored, 10),
  },
  AchievementDef {
    code: "BLOG_POST_50",
    name: "Editor in Chief",
    description: "Publish 50 blog posts",
    icon: "printing-press",
    category: Contribution,
    tier: Gold,
    xp: 500,
    requirement: Requirement::gte(PostsAuthored, 50),
  },
  AchievementDef {
    code: "FIRST_COMMENT",
    name: "Joining In",
    description: "Leave your first comment",
    icon: "speech-bubble",
    category: Contribution,
    tier: Bronze,
    xp: 25,
    requirement: Requirement::gte(CommentsPosted, 1),
  },
  AchievementDef {
    code: "COMMENT_25",
    name: "Commentator",
    description: "Leave 25 comments",
    icon: "megaphone",
    category: Contribution,
    tier: Silver,
    xp: 100,
    requirement: Requirement::gte(CommentsPosted, 25),
  },
  AchievementDef {
    code: "COMMENT_100",
    name: "Town Crier",
    description: "Leave 100 comments",
    icon: "bell",
    category: Contribution,
    tier: Gold,
    xp: 300,
    requirement: Requirement::gte(CommentsPosted, 100),
  },
  AchievementDef {
    code: "FIRST_LISTING",
    name: "Open for Business",
    description: "Create your first marketplace listing",
    icon: "storefront",
    category: Marketplace,
    tier: Bronze,
    xp: 50,
    requirement: Requirement::gte(ListingsCreated, 1),
  },
  AchievementDef {
    code: "LISTING_5",
    name: "Shopkeeper",
    description: "Create 5 marketplace listings",
    icon: "shelves",
    category: Marketplace,
    tier: Silver,
    xp: 150,
    requirement: Requirement::gte(ListingsCreated, 5),
  },
  AchievementDef {
    code: "FIRST_OFFER",
    name: "Dealmaker",
    description: "Make your first offer",
    icon: "handshake",
    category: Marketplace,
    tier: Bronze,
    xp: 25,
    requirement: Requirement::gte(OffersMade, 1),
  },
  AchievementDef {
    code: "OFFER_10",
    name: "Negotiator",
    description: "Make 10 offers",
    icon: "scales",
    category: Marketplace,
    tier: Silver,
    xp: 100,
    requirement: Requirement::gte(OffersMade, 10),
  },
  AchievementDef {
    code: "FIRST_REVIEW",
    name: "Critic",
    description: "Leave your first review",
    icon: "star",
    category: Marketplace,
    tier: Bronze,
    xp: 25,
    requirement: Requirement::gte(ReviewsLeft, 1),
  },
  AchievementDef {
    code: "REVIEW_10",
    name: "Trusted Voice",
    description: "Leave 10 reviews",
    icon: "laurel",
    category: Marketplace,
    tier: Gold,
    xp: 200,
    requirement: Requirement::gte(ReviewsLeft, 10),
  },
  AchievementDef {
    code: "FIRST_CONVERSATION",
    name: "Breaking the Ice",
    description: "Start your first conversation",
    icon: "wave",
    category: Social,
    tier: Bronze,
    xp: 25,
    requirement: Requirement::gte(ConversationsStarted, 1),
  },
  AchievementDef {
    code: "CONVERSATION_10",
    name: "Social Butterfly",
    description: "Start 10 conversations",
    icon: "butterfly",
    category: Social,
    tier: Silver,
    xp: 100,
    requirement: Requirement::gte(ConversationsStarted, 10),
  },
  AchievementDef {
    code: "FIRST_LOGIN",
    name: "Welcome Aboard",
    description: "Log in for the first time",
    icon: "door",
    category: Engagement,
    tier: Bronze,
    xp: 10,
    requirement: Requirement::gte(LoginCount, 1),
  },
  AchievementDef {
    code: "LOGIN_STREAK_7",
    name: "Regular",
    description: "Log in 7 days in a row",
    icon: "calendar",
    category: Engagement,
    tier: Silver,
    xp: 100,
    requirement: Requirement::gte(LoginStreak, 7),
  },
  AchievementDef {
    code: "LOGIN_STREAK_30",
    name: "Devoted",
    description: "Log in 30 days in a row",
    icon: "flame",
    category: Engagement,
    tier: Gold,
    xp: 400,
    requirement: Requirement::gte(LoginStreak, 30),
  },
  AchievementDef {
    code: "LOGIN_STREAK_365",
    name: "Year One",
    description: "Log in every day for a year",
    icon: "crown",
    category: Engagement,
    tier: Legendary,
    xp: 1000,
    requirement: Requirement::gte(LoginStreak, 365),
  },
  AchievementDef {
    code: "PROFILE_COMPLETE",
    name: "All Dressed Up",
    description: "Fill out every field of your profile",
    icon: "id-card",
    category: Special,
    tier: Silver,
    xp: 75,
    requirement: Requirement::eq(ProfileCompletion, 100),
  },
];

#[allow(dead_code)]
pub fn get(code: &str) -> Option<&'static AchievementDef> {
  CATALOG.iter().find(|def| def.code == code)
}

#[allow(dead_code)]
pub fn by_category(category: Category) -> Vec<&'static AchievementDef> {
  CATALOG.iter().filter(|def| def.category == category).collect()
}

#[allow(dead_code)]
pub fn by_tier(tier: Tier) -> Vec<&'static AchievementDef> {
  CATALOG.iter().filter(|def| def.tier == tier).collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn codes_are_unique() {
    let mut seen = HashSet::new();
    for def in CATALOG {
      assert!(seen.insert(def.code), "duplicate catalog code {}", def.code);
    }
  }

  #[test]
  fn xp_is_non_negative() {
    for def in CATALOG {
      assert!(def.xp >= 0, "{} has negative xp", def.code);
    }
  }

  #[test]
  fn lookup_by_code() {
    let def = get("FIRST_BLOG_POST").unwrap();
    assert_eq!(def.requirement.metric, Metric::PostsAuthored);
    assert!(get("NO_SUCH_CODE").is_none());
  }

  #[test]
  fn filters_preserve_declaration_order() {
    let contribution = by_category(Category::Contribution);
    let codes: Vec<_> = contribution.iter().map(|def| def.code).collect();
    assert_eq!(
      codes,
      [
        "FIRST_BLOG_POST",
        "BLOG_POST_10",
        "BLOG_POST_50",
        "FIRST_COMMENT",
        "COMMENT_25",
        "COMMENT_100",
      ]
    );

    let legendary = by_tier(Tier::Legendary);
    assert_eq!(legendary.len(), 1);
    assert_eq!(legendary[0].code, "LOGIN_STREAK_365");
  }

  #[test]
  fn requirement_json_round_trip() {
    let req = Requirement::gte(Metric::CommentsPosted, 25);
    let value = json::to_value(req).unwrap();
    assert_eq!(value["type"], "comments_posted");
    assert_eq!(value["count"], 25);
    assert_eq!(value["comparison"], "gte");

    let parsed: Requirement = json::from_value(value).unwrap();
    assert_eq!(parsed, req);
  }

  #[test]
  fn requirement_defaults() {
    let parsed: Requirement =
      json::from_value(json::json!({ "type": "login_count" })).unwrap();
    assert_eq!(parsed.count, 1);
    assert_eq!(parsed.comparison, Comparison::Gte);
  }

  #[test]
  fn unknown_metric_fails_to_parse() {
    let result = json::from_value::<Requirement>(json::json!({
      "type": "times_sneezed",
      "count": 3,
    }));
    assert!(result.is_err());
  }

  #[test]
  fn comparisons() {
    assert!(Comparison::Gte.satisfied(5, 5));
    assert!(Comparison::Gte.satisfied(6, 5));
    assert!(!Comparison::Gte.satisfied(4, 5));
    assert!(Comparison::Eq.satisfied(100, 100));
    assert!(!Comparison::Eq.satisfied(75, 100));
    assert!(Comparison::Gt.satisfied(2, 1));
    assert!(!Comparison::Gt.satisfied(1, 1));
    assert!(Comparison::Lte.satisfied(0, 1));
    assert!(!Comparison::Lte.satisfied(2, 1));
  }
}
