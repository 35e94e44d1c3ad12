//! Questline - gamified content platform backend
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for HTTP API with rate limiting
//! - Lettre for achievement notification emails
//! - Tokio for async runtime

mod catalog;
mod email;
mod entity;
mod error;
mod handlers;
mod prelude;
mod state;
mod sv;

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, patch, post};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::email::Notifier;
use crate::prelude::*;
use crate::state::AppState;

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  // Initialize tracing
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "questline=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  // Load configuration from environment
  let admins: HashSet<String> = env::var("ADMIN_EMAILS")
    .unwrap_or_default()
    .split(',')
    .filter(|s| !s.trim().is_empty())
    .map(|email| email.trim().to_lowercase())
    .collect();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:questline.db?mode=rwc".into());
  let notifier =
    Notifier::from_env().expect("Failed to configure email transport");

  info!("Starting Questline v{}", env!("CARGO_PKG_VERSION"));

  if admins.is_empty() {
    warn!("No admins configured, catalog seeding will be unavailable");
  }

  // Initialize application state
  let app_state = Arc::new(AppState::new(&db_url, notifier, admins).await);

  // Spawn session garbage collector
  let gc_app = app_state.clone();
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    loop {
      interval.tick().await;
      gc_app.gc_sessions();
    }
  });

  // Configure rate limiting (100 requests per minute per IP)
  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .expect("Failed to build rate limiter config"),
  );

  let governor_limiter = governor_conf.limiter().clone();

  // Spawn rate limiter cleanup task
  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  // Build router with middleware
  let app = Router::new()
    .route("/health", get(handlers::health))
    .route("/api/auth/login", post(handlers::login))
    .route("/api/profile", patch(handlers::update_profile))
    .route("/api/posts", post(handlers::create_post))
    .route("/api/posts/{id}/comments", post(handlers::create_comment))
    .route("/api/listings", post(handlers::create_listing))
    .route("/api/listings/{id}/offers", post(handlers::create_offer))
    .route("/api/listings/{id}/reviews", post(handlers::create_review))
    .route("/api/conversations", post(handlers::start_conversation))
    .route("/api/stats", get(handlers::stats))
    .route("/api/achievements", get(handlers::achievements))
    .route(
      "/api/admin/achievements/seed",
      post(handlers::seed_achievements),
    )
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state);

  // Start HTTP server
  let port: u16 = env::var("PORT")
    .ok()
    .and_then(|p| p.parse().ok())
    .unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {}", addr);

  let listener =
    tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
  axum::serve(listener, app).await.expect("Server error");
}
