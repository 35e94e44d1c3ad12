use crate::{entity::user, prelude::*};

/// Profile fields a user may edit; `None` leaves the field untouched.
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
  pub name: Option<String>,
  pub first_name: Option<String>,
  pub bio: Option<String>,
  pub avatar_url: Option<String>,
}

pub struct User<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> User<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn get_or_create(
    &self,
    email: &str,
    username: &str,
    is_admin: bool,
  ) -> Result<user::Model> {
    if let Some(found) = self.by_email(email).await? {
      // promote on login when the email joined the admin list
      if is_admin && !found.is_admin {
        let found = user::ActiveModel { is_admin: Set(true), ..found.into() }
          .update(self.db)
          .await?;
        return Ok(found);
      }
      return Ok(found);
    }

    let now = Utc::now().naive_utc();
    let user = user::ActiveModel {
      email: Set(email.to_string()),
      username: Set(username.to_string()),
      is_admin: Set(is_admin),
      total_xp: Set(0),
      login_count: Set(0),
      login_streak: Set(0),
      created_at: Set(now),
      ..Default::default()
    };

    Ok(user.insert(self.db).await?)
  }

  pub async fn by_id(&self, id: i64) -> Result<Option<user::Model>> {
    let user = user::Entity::find_by_id(id).one(self.db).await?;
    Ok(user)
  }

  pub async fn by_email(&self, email: &str) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
      .filter(user::Column::Email.eq(email))
      .one(self.db)
      .await?;
    Ok(user)
  }

  /// Bump login counters. The streak advances only across consecutive
  /// calendar days; a same-day login leaves it unchanged, a gap resets it.
  pub async fn record_login(&self, user: user::Model) -> Result<user::Model> {
    let now = Utc::now().naive_utc();

    let streak = match user.last_login_at {
      Some(last) if last.date() == now.date() => user.login_streak,
      Some(last) if last.date().succ_opt() == Some(now.date()) => {
        user.login_streak + 1
      }
      _ => 1,
    };
    let count = user.login_count + 1;

    let user = user::ActiveModel {
      login_count: Set(count),
      login_streak: Set(streak),
      last_login_at: Set(Some(now)),
      ..user.into()
    }
    .update(self.db)
    .await?;

    Ok(user)
  }

  pub async fn update_profile(
    &self,
    user: user::Model,
    update: ProfileUpdate,
  ) -> Result<user::Model> {
    let ProfileUpdate { name, first_name, bio, avatar_url } = update;
    if name.is_none()
      && first_name.is_none()
      && bio.is_none()
      && avatar_url.is_none()
    {
      return Ok(user);
    }

    let mut active: user::ActiveModel = user.into();
    if let Some(name) = name {
      active.name = Set(Some(name));
    }
    if let Some(first_name) = first_name {
      active.first_name = Set(Some(first_name));
    }
    if let Some(bio) = bio {
      active.bio = Set(Some(bio));
    }
    if let Some(avatar_url) = avatar_url {
      active.avatar_url = Set(Some(avatar_url));
    }

    Ok(active.update(self.db).await?)
  }

  #[allow(dead_code)]
  pub async fn count(&self) -> Result<u64> {
    Ok(user::Entity::find().count(self.db).await?)
  }
}
