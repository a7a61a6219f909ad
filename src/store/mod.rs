//! Persistence seam. Every record is keyed by its owning user; no operation
//! touches another user's rows.

use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::error::Result;
use crate::foods::repo_types::{Food, NewFood};
use crate::daily_log::repo_types::{LogEntry, NewLogEntry};
use crate::meals::repo_types::{MealItem, SavedMeal};
use crate::settings::repo_types::MealSettings;
use crate::targets::engine::{BodyProfile, MacroTargets};
use crate::targets::repo_types::TargetRecord;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Sorted by name.
    async fn list_foods(&self, user_id: Uuid) -> Result<Vec<Food>>;
    async fn find_food(&self, user_id: Uuid, name: &str) -> Result<Option<Food>>;
    /// Fails with `Conflict` when the user already has a food with this name.
    async fn insert_food(&self, user_id: Uuid, food: &NewFood) -> Result<Food>;
    async fn delete_food(&self, user_id: Uuid, name: &str) -> Result<bool>;

    /// Sorted by name.
    async fn list_meal_names(&self, user_id: Uuid) -> Result<Vec<String>>;
    async fn find_meal(&self, user_id: Uuid, name: &str) -> Result<Option<SavedMeal>>;
    /// All-or-nothing: on `Conflict` neither the meal nor any item is written.
    async fn insert_meal(&self, user_id: Uuid, name: &str, items: &[MealItem]) -> Result<SavedMeal>;
    async fn delete_meal(&self, user_id: Uuid, name: &str) -> Result<bool>;

    async fn get_targets(&self, user_id: Uuid) -> Result<Option<TargetRecord>>;
    async fn upsert_targets(
        &self,
        user_id: Uuid,
        profile: &BodyProfile,
        targets: &MacroTargets,
    ) -> Result<TargetRecord>;

    async fn get_meal_settings(&self, user_id: Uuid) -> Result<Option<MealSettings>>;
    async fn upsert_meal_settings(&self, user_id: Uuid, settings: MealSettings) -> Result<MealSettings>;

    async fn insert_log_entry(&self, user_id: Uuid, entry: &NewLogEntry) -> Result<LogEntry>;
    /// Oldest first.
    async fn list_log_entries(&self, user_id: Uuid, day: Date) -> Result<Vec<LogEntry>>;
    async fn delete_log_entry(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
}
