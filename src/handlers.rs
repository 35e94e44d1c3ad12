use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::header;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::achievements::AchievementStatus;
use crate::sv::stats::{self, Snapshot};
use crate::sv::user::ProfileUpdate;

/// Caller identity resolved from the `Authorization: Bearer` token.
pub struct CurrentUser(pub user::Model);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    app: &Arc<AppState>,
  ) -> Result<Self> {
    let token = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| value.strip_prefix("Bearer "))
      .ok_or(Error::Unauthenticated)?;

    let user_id = app.touch_session(token).ok_or(Error::Unauthenticated)?;
    let user = app
      .sv()
      .user
      .by_id(user_id)
      .await?
      .ok_or(Error::Unauthenticated)?;

    Ok(Self(user))
  }
}

pub async fn health() -> Json<json::Value> {
  Json(json::json!({
    "status": "ok",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}

#[derive(Debug, Deserialize)]
pub struct LoginReq {
  pub email: String,
  pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRes {
  pub token: String,
  pub user_id: i64,
  pub unlocked: Vec<String>,
}

pub async fn login(
  State(app): State<Arc<AppState>>,
  Json(req): Json<LoginReq>,
) -> Result<Json<LoginRes>> {
  let email = req.email.trim().to_lowercase();
  let username = req
    .username
    .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

  let sv = app.sv();
  let user = sv
    .user
    .get_or_create(&email, &username, app.is_admin_email(&email))
    .await?;
  let user = sv.user.record_login(user).await?;

  let token = app.issue_session(user.id);
  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(LoginRes { token, user_id: user.id, unlocked: eval.unlocked }))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileReq {
  pub name: Option<String>,
  pub first_name: Option<String>,
  pub bio: Option<String>,
  pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileRes {
  pub profile_completion: i64,
  pub unlocked: Vec<String>,
}

pub async fn update_profile(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
  Json(req): Json<UpdateProfileReq>,
) -> Result<Json<ProfileRes>> {
  let sv = app.sv();
  let user = sv
    .user
    .update_profile(
      user,
      ProfileUpdate {
        name: req.name,
        first_name: req.first_name,
        bio: req.bio,
        avatar_url: req.avatar_url,
      },
    )
    .await?;

  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(ProfileRes {
    profile_completion: stats::profile_completion(&user),
    unlocked: eval.unlocked,
  }))
}

#[derive(Debug, Serialize)]
pub struct CreatedRes {
  pub id: i64,
  pub unlocked: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostReq {
  pub title: String,
  pub body: String,
}

pub async fn create_post(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
  Json(req): Json<CreatePostReq>,
) -> Result<Json<CreatedRes>> {
  let sv = app.sv();
  let post = sv.content.create_post(user.id, req.title, req.body).await?;
  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(CreatedRes { id: post.id, unlocked: eval.unlocked }))
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentReq {
  pub body: String,
}

pub async fn create_comment(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
  Path(post_id): Path<i64>,
  Json(req): Json<CreateCommentReq>,
) -> Result<Json<CreatedRes>> {
  let sv = app.sv();
  let comment =
    sv.content.create_comment(user.id, post_id, req.body).await?;
  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(CreatedRes { id: comment.id, unlocked: eval.unlocked }))
}

#[derive(Debug, Deserialize)]
pub struct CreateListingReq {
  pub title: String,
  pub description: String,
  pub price_cents: i64,
}

pub async fn create_listing(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
  Json(req): Json<CreateListingReq>,
) -> Result<Json<CreatedRes>> {
  let sv = app.sv();
  let listing = sv
    .market
    .create_listing(user.id, req.title, req.description, req.price_cents)
    .await?;
  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(CreatedRes { id: listing.id, unlocked: eval.unlocked }))
}

#[derive(Debug, Deserialize)]
pub struct CreateOfferReq {
  pub amount_cents: i64,
}

pub async fn create_offer(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
  Path(listing_id): Path<i64>,
  Json(req): Json<CreateOfferReq>,
) -> Result<Json<CreatedRes>> {
  let sv = app.sv();
  let offer =
    sv.market.create_offer(user.id, listing_id, req.amount_cents).await?;
  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(CreatedRes { id: offer.id, unlocked: eval.unlocked }))
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewReq {
  pub rating: i32,
  pub body: String,
}

pub async fn create_review(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
  Path(listing_id): Path<i64>,
  Json(req): Json<CreateReviewReq>,
) -> Result<Json<CreatedRes>> {
  let sv = app.sv();
  let review = sv
    .market
    .create_review(user.id, listing_id, req.rating, req.body)
    .await?;
  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(CreatedRes { id: review.id, unlocked: eval.unlocked }))
}

#[derive(Debug, Deserialize)]
pub struct StartConversationReq {
  pub recipient_id: i64,
  pub subject: Option<String>,
}

pub async fn start_conversation(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
  Json(req): Json<StartConversationReq>,
) -> Result<Json<CreatedRes>> {
  let sv = app.sv();
  let conversation = sv
    .content
    .start_conversation(user.id, req.recipient_id, req.subject)
    .await?;
  let eval = sv.achievements.check_and_unlock(user.id).await?;

  Ok(Json(CreatedRes { id: conversation.id, unlocked: eval.unlocked }))
}

#[derive(Debug, Serialize)]
pub struct StatsRes {
  #[serde(flatten)]
  pub stats: Snapshot,
  pub total_xp: i64,
}

pub async fn stats(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<StatsRes>> {
  let snapshot = app.sv().stats.snapshot(user.id).await?;
  Ok(Json(StatsRes { stats: snapshot, total_xp: user.total_xp }))
}

pub async fn achievements(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<AchievementStatus>>> {
  let overview = app.sv().achievements.overview(user.id).await?;
  Ok(Json(overview))
}

#[derive(Debug, Serialize)]
pub struct SeedRes {
  pub created: Vec<String>,
}

pub async fn seed_achievements(
  State(app): State<Arc<AppState>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<SeedRes>> {
  let created = app.sv().achievements.seed(&user).await?;
  Ok(Json(SeedRes {
    created: created.into_iter().map(|ach| ach.code).collect(),
  }))
}
