pub use std::collections::{HashMap, HashSet};
pub use std::sync::Arc;

pub use chrono::{Datelike, NaiveDateTime as DateTime, Utc};
pub use dashmap::DashMap;
pub use migration::{Migrator, MigratorTrait};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
  NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
  TransactionTrait,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
