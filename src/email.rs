//! Achievement notification emails over SMTP.
//!
//! Delivery is best-effort: the evaluator spawns sends on a detached task
//! and only logs failures. Without `SMTP_HOST` the notifier runs in a
//! log-only mode, which is also what the tests use.

use std::env;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

#[derive(Clone)]
pub struct Notifier {
  mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
  from: String,
}

impl Notifier {
  pub fn from_env() -> anyhow::Result<Self> {
    let from = env::var("EMAIL_FROM")
      .unwrap_or_else(|_| "Questline <noreply@questline.app>".into());

    let Ok(host) = env::var("SMTP_HOST") else {
      info!("SMTP_HOST not set, email notifications disabled");
      return Ok(Self { mailer: None, from });
    };

    let port: u16 = env::var("SMTP_PORT")
      .ok()
      .and_then(|p| p.parse().ok())
      .unwrap_or(587);
    let username = env::var("SMTP_USERNAME").unwrap_or_default();
    let password = env::var("SMTP_PASSWORD").unwrap_or_default();

    let mailer = if username.is_empty() || password.is_empty() {
      // Unauthenticated relay, e.g. a local MailDev instance
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host)
        .port(port)
        .build()
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&host)?
        .port(port)
        .credentials(Credentials::new(username, password))
        .build()
    };

    info!(%host, port, "email notifications enabled");
    Ok(Self { mailer: Some(mailer), from })
  }

  /// Log-only notifier for tests and local runs without SMTP.
  #[allow(dead_code)]
  pub fn disabled() -> Self {
    Self { mailer: None, from: "Questline <noreply@questline.app>".into() }
  }

  pub async fn achievement_unlocked(
    &self,
    to: &str,
    name: &str,
    description: &str,
    icon: Option<&str>,
  ) -> anyhow::Result<()> {
    let Some(mailer) = &self.mailer else {
      info!(%to, achievement = %name, "email disabled, skipping notification");
      return Ok(());
    };

    let mut body = format!(
      "Congratulations!\n\nYou unlocked \"{name}\":\n{description}\n"
    );
    if let Some(icon) = icon {
      body.push_str(&format!("\nBadge: {icon}\n"));
    }

    let message = Message::builder()
      .from(self.from.parse()?)
      .to(to.parse()?)
      .subject(format!("Achievement unlocked: {name}"))
      .header(ContentType::TEXT_PLAIN)
      .body(body)?;

    mailer.send(message).await?;
    Ok(())
  }
}
