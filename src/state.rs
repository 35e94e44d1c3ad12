use uuid::Uuid;

use crate::{email::Notifier, prelude::*, sv};

#[derive(Debug, Clone)]
pub struct Session {
  pub user_id: i64,
  pub last_seen: DateTime,
}

pub type Sessions = DashMap<String, Session>;

#[derive(Debug, Clone)]
pub struct Config {
  /// seconds of idle time before a session is collected
  pub session_lifetime: i64,
}

impl Default for Config {
  fn default() -> Self {
    Self { session_lifetime: 24 * 3600 }
  }
}

pub struct Services<'a> {
  pub user: sv::User<'a>,
  pub stats: sv::Stats<'a>,
  pub content: sv::Content<'a>,
  pub market: sv::Market<'a>,
  pub achievements: sv::Achievements<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub notifier: Notifier,
  pub admins: HashSet<String>,
  pub sessions: Sessions,
  pub config: Config,
}

impl AppState {
  pub async fn new(
    db_url: &str,
    notifier: Notifier,
    admins: HashSet<String>,
  ) -> Self {
    Self::with_config(db_url, notifier, admins, Config::default()).await
  }

  pub async fn with_config(
    db_url: &str,
    notifier: Notifier,
    admins: HashSet<String>,
    config: Config,
  ) -> Self {
    info!("Connecting to database...");
    let db =
      Database::connect(db_url).await.expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self { db, notifier, admins, sessions: DashMap::new(), config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::User::new(&self.db),
      stats: sv::Stats::new(&self.db),
      content: sv::Content::new(&self.db),
      market: sv::Market::new(&self.db),
      achievements: sv::Achievements::new(&self.db, self.notifier.clone()),
    }
  }

  pub fn is_admin_email(&self, email: &str) -> bool {
    self.admins.contains(email)
  }

  pub fn issue_session(&self, user_id: i64) -> String {
    let token = Uuid::new_v4().to_string();
    let now = Utc::now().naive_utc();
    self.sessions.insert(token.clone(), Session { user_id, last_seen: now });
    token
  }

  /// Resolve a bearer token, refreshing its idle timer.
  pub fn touch_session(&self, token: &str) -> Option<i64> {
    let mut session = self.sessions.get_mut(token)?;
    session.last_seen = Utc::now().naive_utc();
    Some(session.user_id)
  }

  pub fn gc_sessions(&self) {
    let now = Utc::now().naive_utc();
    let timeout = self.config.session_lifetime;

    self.sessions.retain(|_token, session| {
      (now - session.last_seen).num_seconds() < timeout
    });
  }
}
