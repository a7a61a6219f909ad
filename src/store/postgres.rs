use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::Store;
use crate::auth::repo_types::User;
use crate::error::{AppError, Result};
use crate::foods::{self, repo_types::{Food, NewFood}};
use crate::daily_log::{self, repo_types::{LogEntry, NewLogEntry}};
use crate::meals::{self, repo_types::{MealItem, SavedMeal}};
use crate::settings::{self, repo_types::MealSettings};
use crate::targets::{self, engine::{BodyProfile, MacroTargets}, repo_types::TargetRecord};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Maps a unique-constraint violation to `Conflict`, anything else to `Database`.
fn conflict_on_unique(e: sqlx::Error, what: impl FnOnce() -> String) -> AppError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => AppError::Conflict(what()),
        _ => AppError::Database(e),
    }
}

fn target_record(row: targets::repo_types::TargetRow) -> Result<TargetRecord> {
    TargetRecord::try_from(row)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored target record is invalid: {e}")))
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        User::create(&self.db, username, password_hash)
            .await
            .map_err(|e| conflict_on_unique(e, || "username already registered".into()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(User::find_by_username(&self.db, username).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(User::find_by_id(&self.db, id).await?)
    }

    async fn list_foods(&self, user_id: Uuid) -> Result<Vec<Food>> {
        Ok(foods::repo::list_by_user(&self.db, user_id).await?)
    }

    async fn find_food(&self, user_id: Uuid, name: &str) -> Result<Option<Food>> {
        Ok(foods::repo::find(&self.db, user_id, name).await?)
    }

    async fn insert_food(&self, user_id: Uuid, food: &NewFood) -> Result<Food> {
        foods::repo::insert(&self.db, user_id, food)
            .await
            .map_err(|e| conflict_on_unique(e, || format!("food {:?} already exists", food.name)))
    }

    async fn delete_food(&self, user_id: Uuid, name: &str) -> Result<bool> {
        Ok(foods::repo::delete(&self.db, user_id, name).await?)
    }

    async fn list_meal_names(&self, user_id: Uuid) -> Result<Vec<String>> {
        Ok(meals::repo::list_names(&self.db, user_id).await?)
    }

    async fn find_meal(&self, user_id: Uuid, name: &str) -> Result<Option<SavedMeal>> {
        Ok(meals::repo::find_by_name(&self.db, user_id, name).await?)
    }

    async fn insert_meal(&self, user_id: Uuid, name: &str, items: &[MealItem]) -> Result<SavedMeal> {
        meals::repo::insert_with_items(&self.db, user_id, name, items)
            .await
            .map_err(|e| conflict_on_unique(e, || format!("meal {name:?} already exists")))
    }

    async fn delete_meal(&self, user_id: Uuid, name: &str) -> Result<bool> {
        Ok(meals::repo::delete_by_name(&self.db, user_id, name).await?)
    }

    async fn get_targets(&self, user_id: Uuid) -> Result<Option<TargetRecord>> {
        targets::repo::get(&self.db, user_id)
            .await?
            .map(target_record)
            .transpose()
    }

    async fn upsert_targets(
        &self,
        user_id: Uuid,
        profile: &BodyProfile,
        macro_targets: &MacroTargets,
    ) -> Result<TargetRecord> {
        let row = targets::repo::upsert(&self.db, user_id, profile, macro_targets).await?;
        target_record(row)
    }

    async fn get_meal_settings(&self, user_id: Uuid) -> Result<Option<MealSettings>> {
        Ok(settings::repo::get(&self.db, user_id).await?)
    }

    async fn upsert_meal_settings(&self, user_id: Uuid, s: MealSettings) -> Result<MealSettings> {
        Ok(settings::repo::upsert(&self.db, user_id, s).await?)
    }

    async fn insert_log_entry(&self, user_id: Uuid, entry: &NewLogEntry) -> Result<LogEntry> {
        Ok(daily_log::repo::insert(&self.db, user_id, entry).await?)
    }

    async fn list_log_entries(&self, user_id: Uuid, day: Date) -> Result<Vec<LogEntry>> {
        Ok(daily_log::repo::list_for_day(&self.db, user_id, day).await?)
    }

    async fn delete_log_entry(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        Ok(daily_log::repo::delete(&self.db, user_id, id).await?)
    }
}
