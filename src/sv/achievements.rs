use sea_orm::sea_query::Expr;
use serde::Serialize;

use crate::{
  catalog::{self, Requirement},
  email::Notifier,
  entity::{Category, Tier, achievement, user, user_achievement},
  prelude::*,
  sv::Stats,
};

/// Outcome of one evaluation pass: codes unlocked by this call, plus the
/// live metric value for every candidate that is still locked.
#[derive(Debug, Default)]
pub struct Evaluation {
  pub unlocked: Vec<String>,
  pub progress: HashMap<String, i64>,
}

/// One row of the user-facing achievement overview.
#[derive(Debug, Serialize)]
pub struct AchievementStatus {
  pub code: String,
  pub name: String,
  pub description: String,
  pub icon: String,
  pub category: Category,
  pub tier: Tier,
  pub xp: i32,
  pub unlocked: bool,
  pub unlocked_at: Option<DateTime>,
  pub progress: i64,
  pub max_progress: i64,
}

pub struct Achievements<'a> {
  db: &'a DatabaseConnection,
  notifier: Notifier,
}

impl<'a> Achievements<'a> {
  pub fn new(db: &'a DatabaseConnection, notifier: Notifier) -> Self {
    Self { db, notifier }
  }

  /// Materialize the compiled-in catalog into the store. Existing codes are
  /// skipped, never rewritten; only newly created rows are returned.
  pub async fn seed(
    &self,
    actor: &user::Model,
  ) -> Result<Vec<achievement::Model>> {
    if !actor.is_admin {
      return Err(Error::Forbidden);
    }

    let existing: HashSet<String> = achievement::Entity::find()
      .all(self.db)
      .await?
      .into_iter()
      .map(|row| row.code)
      .collect();

    let now = Utc::now().naive_utc();
    let mut created = Vec::new();

    for def in catalog::CATALOG {
      if existing.contains(def.code) {
        continue;
      }

      let requirements = json::to_value(def.requirement)
        .map_err(|err| Error::Internal(err.to_string()))?;

      let row = achievement::ActiveModel {
        id: NotSet,
        code: Set(def.code.to_string()),
        name: Set(def.name.to_string()),
        description: Set(def.description.to_string()),
        icon: Set(def.icon.to_string()),
        category: Set(def.category),
        tier: Set(def.tier),
        xp: Set(def.xp),
        requirements: Set(requirements),
        is_visible: Set(true),
        unlock_count: Set(0),
        created_by: Set(actor.id),
        created_at: Set(now),
      };

      created.push(row.insert(self.db).await?);
    }

    info!(created = created.len(), "seeded achievement catalog");
    Ok(created)
  }

  /// Evaluate every visible, not-yet-unlocked achievement against a fresh
  /// stats snapshot and unlock the satisfied ones. Unlocks are monotonic:
  /// rows recorded earlier are excluded and never re-checked.
  pub async fn check_and_unlock(&self, user_id: i64) -> Result<Evaluation> {
    let user = user::Entity::find_by_id(user_id)
      .one(self.db)
      .await?
      .ok_or(Error::UserNotFound)?;

    let stats = Stats::new(self.db).snapshot(user_id).await?;

    let already: HashSet<i32> = user_achievement::Entity::find()
      .filter(user_achievement::Column::UserId.eq(user_id))
      .all(self.db)
      .await?
      .into_iter()
      .map(|row| row.achievement_id)
      .collect();

    // seed order is catalog order
    let candidates = achievement::Entity::find()
      .filter(achievement::Column::IsVisible.eq(true))
      .order_by_asc(achievement::Column::Id)
      .all(self.db)
      .await?;

    let mut evaluation = Evaluation::default();

    for ach in candidates {
      if already.contains(&ach.id) {
        continue;
      }

      let req =
        match json::from_value::<Requirement>(ach.requirements.clone()) {
          Ok(req) => req,
          Err(err) => {
            warn!(
              code = %ach.code, %err,
              "unrecognized achievement requirement, treating as unsatisfiable"
            );
            continue;
          }
        };

      let value = req.metric.value(&stats);
      if req.comparison.satisfied(value, req.count) {
        if self.unlock(&user, &ach, req.count).await? {
          self.notify(&user, &ach);
          evaluation.unlocked.push(ach.code);
        }
      } else {
        evaluation.progress.insert(ach.code, value);
      }
    }

    if !evaluation.unlocked.is_empty() {
      info!(user = user_id, unlocked = ?evaluation.unlocked, "achievements unlocked");
    }

    Ok(evaluation)
  }

  /// Persist one unlock. The insert relies on the composite primary key of
  /// `user_achievements`: a uniqueness violation means a concurrent
  /// evaluation recorded the unlock first, which is a success for the
  /// caller but must not double-count or re-notify. Returns whether this
  /// call performed the unlock.
  async fn unlock(
    &self,
    user: &user::Model,
    ach: &achievement::Model,
    threshold: i64,
  ) -> Result<bool> {
    let txn = self.db.begin().await?;

    let row = user_achievement::ActiveModel {
      user_id: Set(user.id),
      achievement_id: Set(ach.id),
      progress: Set(threshold),
      max_progress: Set(threshold),
      unlocked_at: Set(Utc::now().naive_utc()),
    };

    if let Err(err) = row.insert(&txn).await {
      txn.rollback().await?;
      return match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
          debug!(user = user.id, code = %ach.code, "unlock raced, already recorded");
          Ok(false)
        }
        _ => Err(err.into()),
      };
    }

    achievement::Entity::update_many()
      .col_expr(
        achievement::Column::UnlockCount,
        Expr::col(achievement::Column::UnlockCount).add(1),
      )
      .filter(achievement::Column::Id.eq(ach.id))
      .exec(&txn)
      .await?;

    user::Entity::update_many()
      .col_expr(
        user::Column::TotalXp,
        Expr::col(user::Column::TotalXp).add(ach.xp),
      )
      .filter(user::Column::Id.eq(user.id))
      .exec(&txn)
      .await?;

    txn.commit().await?;
    Ok(true)
  }

  /// Detached best-effort email; never blocks or fails the unlock.
  fn notify(&self, user: &user::Model, ach: &achievement::Model) {
    let notifier = self.notifier.clone();
    let to = user.email.clone();
    let name = ach.name.clone();
    let description = ach.description.clone();
    let icon = ach.icon.clone();

    tokio::spawn(async move {
      if let Err(err) = notifier
        .achievement_unlocked(&to, &name, &description, Some(&icon))
        .await
      {
        warn!(%to, achievement = %name, %err, "achievement email failed");
      }
    });
  }

  /// Display-ready list of all visible achievements with the user's unlock
  /// state. Locked entries always show zero progress; this read path never
  /// runs the evaluator.
  pub async fn overview(
    &self,
    user_id: i64,
  ) -> Result<Vec<AchievementStatus>> {
    let unlocks: HashMap<i32, user_achievement::Model> =
      user_achievement::Entity::find()
        .filter(user_achievement::Column::UserId.eq(user_id))
        .all(self.db)
        .await?
        .into_iter()
        .map(|row| (row.achievement_id, row))
        .collect();

    let mut statuses: Vec<AchievementStatus> = achievement::Entity::find()
      .filter(achievement::Column::IsVisible.eq(true))
      .all(self.db)
      .await?
      .into_iter()
      .map(|ach| {
        let threshold =
          json::from_value::<Requirement>(ach.requirements.clone())
            .map(|req| req.count)
            .unwrap_or_default();

        let (unlocked, unlocked_at, progress, max_progress) =
          match unlocks.get(&ach.id) {
            Some(row) => {
              (true, Some(row.unlocked_at), row.progress, row.max_progress)
            }
            None => (false, None, 0, threshold),
          };

        AchievementStatus {
          code: ach.code,
          name: ach.name,
          description: ach.description,
          icon: ach.icon,
          category: ach.category,
          tier: ach.tier,
          xp: ach.xp,
          unlocked,
          unlocked_at,
          progress,
          max_progress,
        }
      })
      .collect();

    statuses.sort_by_key(|s| {
      (s.category.rank(), s.tier.rank(), std::cmp::Reverse(s.xp))
    });

    Ok(statuses)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::setup_test_db;
  use crate::sv::user::ProfileUpdate;
  use crate::sv::{Content, User};

  fn sv(db: &DatabaseConnection) -> Achievements<'_> {
    Achievements::new(db, Notifier::disabled())
  }

  async fn seed_catalog(db: &DatabaseConnection) -> user::Model {
    let admin = User::new(db)
      .get_or_create("admin@example.com", "admin", true)
      .await
      .unwrap();
    sv(db).seed(&admin).await.unwrap();
    admin
  }

  async fn unlock_rows(
    db: &DatabaseConnection,
    user_id: i64,
  ) -> Vec<user_achievement::Model> {
    user_achievement::Entity::find()
      .filter(user_achievement::Column::UserId.eq(user_id))
      .all(db)
      .await
      .unwrap()
  }

  async fn by_code(
    db: &DatabaseConnection,
    code: &str,
  ) -> achievement::Model {
    achievement::Entity::find()
      .filter(achievement::Column::Code.eq(code))
      .one(db)
      .await
      .unwrap()
      .unwrap()
  }

  #[tokio::test]
  async fn seeding_requires_admin() {
    let db = setup_test_db().await;
    let user = User::new(&db)
      .get_or_create("kay@example.com", "kay", false)
      .await
      .unwrap();

    let result = sv(&db).seed(&user).await;
    assert!(matches!(result, Err(Error::Forbidden)));

    let count = achievement::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
  }

  #[tokio::test]
  async fn seeding_is_idempotent() {
    let db = setup_test_db().await;
    let admin = seed_catalog(&db).await;

    let count = achievement::Entity::find().count(&db).await.unwrap();
    assert_eq!(count as usize, catalog::CATALOG.len());

    let second = sv(&db).seed(&admin).await.unwrap();
    assert!(second.is_empty());

    let count = achievement::Entity::find().count(&db).await.unwrap();
    assert_eq!(count as usize, catalog::CATALOG.len());
  }

  // The worked example: one blog post, quarter-complete profile.
  #[tokio::test]
  async fn first_post_unlocks_and_progress_is_reported() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let users = User::new(&db);
    let user =
      users.get_or_create("kay@example.com", "kay", false).await.unwrap();
    let user = users
      .update_profile(
        user,
        ProfileUpdate { name: Some("Kay".into()), ..Default::default() },
      )
      .await
      .unwrap();

    Content::new(&db)
      .create_post(user.id, "hello".into(), "world".into())
      .await
      .unwrap();

    let eval = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert_eq!(eval.unlocked, ["FIRST_BLOG_POST"]);
    assert_eq!(eval.progress.get("PROFILE_COMPLETE"), Some(&25));
    assert!(!eval.progress.contains_key("FIRST_BLOG_POST"));

    let rows = unlock_rows(&db, user.id).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].progress, 1);
    assert_eq!(rows[0].max_progress, 1);

    assert_eq!(by_code(&db, "FIRST_BLOG_POST").await.unlock_count, 1);
  }

  #[tokio::test]
  async fn reevaluation_is_monotonic() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let user = User::new(&db)
      .get_or_create("kay@example.com", "kay", false)
      .await
      .unwrap();
    Content::new(&db)
      .create_post(user.id, "hello".into(), "world".into())
      .await
      .unwrap();

    let first = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert_eq!(first.unlocked, ["FIRST_BLOG_POST"]);

    let second = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert!(second.unlocked.is_empty());
    assert!(!second.progress.contains_key("FIRST_BLOG_POST"));

    assert_eq!(unlock_rows(&db, user.id).await.len(), 1);
    assert_eq!(by_code(&db, "FIRST_BLOG_POST").await.unlock_count, 1);
  }

  // gte is a floor: progress records the threshold, not the higher stat.
  #[tokio::test]
  async fn exceeding_a_floor_still_unlocks_at_threshold() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let user = User::new(&db)
      .get_or_create("kay@example.com", "kay", false)
      .await
      .unwrap();
    let content = Content::new(&db);
    for i in 0..3 {
      content
        .create_post(user.id, format!("post {i}"), "body".into())
        .await
        .unwrap();
    }

    let eval = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert!(eval.unlocked.contains(&"FIRST_BLOG_POST".to_string()));

    let first = by_code(&db, "FIRST_BLOG_POST").await;
    let row = unlock_rows(&db, user.id)
      .await
      .into_iter()
      .find(|row| row.achievement_id == first.id)
      .unwrap();
    assert_eq!(row.progress, 1);
    assert_eq!(row.max_progress, 1);

    // still short of BLOG_POST_10; live value reported
    assert_eq!(eval.progress.get("BLOG_POST_10"), Some(&3));
  }

  #[tokio::test]
  async fn eq_requirement_needs_exact_value() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let users = User::new(&db);
    let user =
      users.get_or_create("kay@example.com", "kay", false).await.unwrap();
    let user = users
      .update_profile(
        user,
        ProfileUpdate {
          name: Some("Kay".into()),
          first_name: Some("Kay".into()),
          bio: Some("hi".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap();

    // 75% complete: not yet
    let eval = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert!(!eval.unlocked.contains(&"PROFILE_COMPLETE".to_string()));
    assert_eq!(eval.progress.get("PROFILE_COMPLETE"), Some(&75));

    let user = users
      .update_profile(
        user,
        ProfileUpdate {
          avatar_url: Some("https://cdn.example.com/kay.png".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap();

    let eval = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert!(eval.unlocked.contains(&"PROFILE_COMPLETE".to_string()));
  }

  #[tokio::test]
  async fn duplicate_unlock_is_idempotent() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let user = User::new(&db)
      .get_or_create("kay@example.com", "kay", false)
      .await
      .unwrap();
    let ach = by_code(&db, "FIRST_BLOG_POST").await;

    let sv = sv(&db);
    assert!(sv.unlock(&user, &ach, 1).await.unwrap());
    // second writer loses the race on the composite key
    assert!(!sv.unlock(&user, &ach, 1).await.unwrap());

    assert_eq!(unlock_rows(&db, user.id).await.len(), 1);
    assert_eq!(by_code(&db, "FIRST_BLOG_POST").await.unlock_count, 1);

    let user = User::new(&db).by_id(user.id).await.unwrap().unwrap();
    assert_eq!(user.total_xp, i64::from(ach.xp));
  }

  #[tokio::test]
  async fn unlock_count_is_per_user() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let users = User::new(&db);
    let content = Content::new(&db);
    for email in ["a@example.com", "b@example.com"] {
      let user = users.get_or_create(email, "user", false).await.unwrap();
      content
        .create_post(user.id, "hi".into(), "body".into())
        .await
        .unwrap();
      sv(&db).check_and_unlock(user.id).await.unwrap();
    }

    assert_eq!(by_code(&db, "FIRST_BLOG_POST").await.unlock_count, 2);
  }

  #[tokio::test]
  async fn unknown_requirement_metric_is_skipped() {
    let db = setup_test_db().await;
    let admin = seed_catalog(&db).await;

    // a hand-edited store row the compiled evaluator knows nothing about
    achievement::ActiveModel {
      id: NotSet,
      code: Set("MYSTERY".into()),
      name: Set("Mystery".into()),
      description: Set("???".into()),
      icon: Set("question".into()),
      category: Set(Category::Special),
      tier: Set(Tier::Bronze),
      xp: Set(10),
      requirements: Set(json::json!({ "type": "times_sneezed", "count": 1 })),
      is_visible: Set(true),
      unlock_count: Set(0),
      created_by: Set(admin.id),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&db)
    .await
    .unwrap();

    let user = User::new(&db)
      .get_or_create("kay@example.com", "kay", false)
      .await
      .unwrap();

    let eval = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert!(!eval.unlocked.contains(&"MYSTERY".to_string()));
    assert!(!eval.progress.contains_key("MYSTERY"));
  }

  #[tokio::test]
  async fn hidden_achievements_are_not_evaluated() {
    let db = setup_test_db().await;
    let admin = seed_catalog(&db).await;

    achievement::ActiveModel {
      id: NotSet,
      code: Set("SHADOW".into()),
      name: Set("Shadow".into()),
      description: Set("hidden".into()),
      icon: Set("ghost".into()),
      category: Set(Category::Special),
      tier: Set(Tier::Bronze),
      xp: Set(10),
      requirements: Set(
        json::to_value(Requirement::gte(
          crate::catalog::Metric::PostsAuthored,
          1,
        ))
        .unwrap(),
      ),
      is_visible: Set(false),
      unlock_count: Set(0),
      created_by: Set(admin.id),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&db)
    .await
    .unwrap();

    let user = User::new(&db)
      .get_or_create("kay@example.com", "kay", false)
      .await
      .unwrap();
    Content::new(&db)
      .create_post(user.id, "hi".into(), "body".into())
      .await
      .unwrap();

    let eval = sv(&db).check_and_unlock(user.id).await.unwrap();
    assert!(!eval.unlocked.contains(&"SHADOW".to_string()));
  }

  #[tokio::test]
  async fn missing_user_fails_evaluation() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let result = sv(&db).check_and_unlock(4242).await;
    assert!(matches!(result, Err(Error::UserNotFound)));
  }

  #[tokio::test]
  async fn overview_orders_and_zeroes_locked_progress() {
    let db = setup_test_db().await;
    seed_catalog(&db).await;

    let user = User::new(&db)
      .get_or_create("kay@example.com", "kay", false)
      .await
      .unwrap();
    Content::new(&db)
      .create_post(user.id, "hi".into(), "body".into())
      .await
      .unwrap();
    sv(&db).check_and_unlock(user.id).await.unwrap();

    let overview = sv(&db).overview(user.id).await.unwrap();
    assert_eq!(overview.len(), catalog::CATALOG.len());

    // sorted by category, tier, then xp descending
    for pair in overview.windows(2) {
      let (a, b) = (&pair[0], &pair[1]);
      let key_a = (a.category.rank(), a.tier.rank(), -i64::from(a.xp));
      let key_b = (b.category.rank(), b.tier.rank(), -i64::from(b.xp));
      assert!(key_a <= key_b, "{} sorted after {}", a.code, b.code);
    }

    for status in &overview {
      if status.code == "FIRST_BLOG_POST" {
        assert!(status.unlocked);
        assert_eq!(status.progress, 1);
        assert!(status.unlocked_at.is_some());
      } else {
        assert!(!status.unlocked, "{} unexpectedly unlocked", status.code);
        // locked rows never show live progress in the overview
        assert_eq!(status.progress, 0);
      }
    }
  }
}
