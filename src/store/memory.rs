//! In-process store backing `AppState::fake()` and the test suite.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::auth::repo_types::User;
use crate::daily_log::repo_types::{LogEntry, NewLogEntry};
use crate::error::{AppError, Result};
use crate::foods::repo_types::{Food, NewFood};
use crate::meals::repo_types::{MealItem, SavedMeal};
use crate::settings::repo_types::MealSettings;
use crate::targets::engine::{BodyProfile, MacroTargets};
use crate::targets::repo_types::TargetRecord;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // BTreeMap keys keep per-user listings sorted by name.
    foods: BTreeMap<(Uuid, String), Food>,
    meals: BTreeMap<(Uuid, String), SavedMeal>,
    targets: HashMap<Uuid, TargetRecord>,
    settings: HashMap<Uuid, MealSettings>,
    log: Vec<LogEntry>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == username) {
            return Err(AppError::Conflict("username already registered".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_foods(&self, user_id: Uuid) -> Result<Vec<Food>> {
        let t = self.tables.read().await;
        Ok(t.foods
            .iter()
            .filter(|((owner, _), _)| *owner == user_id)
            .map(|(_, f)| f.clone())
            .collect())
    }

    async fn find_food(&self, user_id: Uuid, name: &str) -> Result<Option<Food>> {
        let t = self.tables.read().await;
        Ok(t.foods.get(&(user_id, name.to_string())).cloned())
    }

    async fn insert_food(&self, user_id: Uuid, food: &NewFood) -> Result<Food> {
        let mut t = self.tables.write().await;
        let key = (user_id, food.name.clone());
        if t.foods.contains_key(&key) {
            return Err(AppError::Conflict(format!("food {:?} already exists", food.name)));
        }
        let row = Food {
            user_id,
            name: food.name.clone(),
            calories: food.per_100g.calories,
            protein: food.per_100g.protein,
            carbs: food.per_100g.carbs,
            fats: food.per_100g.fats,
            created_at: OffsetDateTime::now_utc(),
        };
        t.foods.insert(key, row.clone());
        Ok(row)
    }

    async fn delete_food(&self, user_id: Uuid, name: &str) -> Result<bool> {
        let mut t = self.tables.write().await;
        Ok(t.foods.remove(&(user_id, name.to_string())).is_some())
    }

    async fn list_meal_names(&self, user_id: Uuid) -> Result<Vec<String>> {
        let t = self.tables.read().await;
        Ok(t.meals
            .keys()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn find_meal(&self, user_id: Uuid, name: &str) -> Result<Option<SavedMeal>> {
        let t = self.tables.read().await;
        Ok(t.meals.get(&(user_id, name.to_string())).cloned())
    }

    async fn insert_meal(&self, user_id: Uuid, name: &str, items: &[MealItem]) -> Result<SavedMeal> {
        let mut t = self.tables.write().await;
        let key = (user_id, name.to_string());
        if t.meals.contains_key(&key) {
            return Err(AppError::Conflict(format!("meal {name:?} already exists")));
        }
        let meal = SavedMeal {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: OffsetDateTime::now_utc(),
            items: items.to_vec(),
        };
        t.meals.insert(key, meal.clone());
        Ok(meal)
    }

    async fn delete_meal(&self, user_id: Uuid, name: &str) -> Result<bool> {
        let mut t = self.tables.write().await;
        Ok(t.meals.remove(&(user_id, name.to_string())).is_some())
    }

    async fn get_targets(&self, user_id: Uuid) -> Result<Option<TargetRecord>> {
        Ok(self.tables.read().await.targets.get(&user_id).cloned())
    }

    async fn upsert_targets(
        &self,
        user_id: Uuid,
        profile: &BodyProfile,
        targets: &MacroTargets,
    ) -> Result<TargetRecord> {
        let record = TargetRecord {
            profile: *profile,
            targets: *targets,
            updated_at: OffsetDateTime::now_utc(),
        };
        self.tables
            .write()
            .await
            .targets
            .insert(user_id, record.clone());
        Ok(record)
    }

    async fn get_meal_settings(&self, user_id: Uuid) -> Result<Option<MealSettings>> {
        Ok(self.tables.read().await.settings.get(&user_id).copied())
    }

    async fn upsert_meal_settings(&self, user_id: Uuid, settings: MealSettings) -> Result<MealSettings> {
        self.tables.write().await.settings.insert(user_id, settings);
        Ok(settings)
    }

    async fn insert_log_entry(&self, user_id: Uuid, entry: &NewLogEntry) -> Result<LogEntry> {
        let row = LogEntry {
            id: Uuid::new_v4(),
            user_id,
            logged_on: entry.logged_on,
            food_name: entry.food_name.clone(),
            grams: entry.grams,
            calories: entry.macros.calories,
            protein: entry.macros.protein,
            carbs: entry.macros.carbs,
            fats: entry.macros.fats,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables.write().await.log.push(row.clone());
        Ok(row)
    }

    async fn list_log_entries(&self, user_id: Uuid, day: Date) -> Result<Vec<LogEntry>> {
        let t = self.tables.read().await;
        Ok(t.log
            .iter()
            .filter(|e| e.user_id == user_id && e.logged_on == day)
            .cloned()
            .collect())
    }

    async fn delete_log_entry(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let mut t = self.tables.write().await;
        let before = t.log.len();
        t.log.retain(|e| !(e.user_id == user_id && e.id == id));
        Ok(t.log.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::Macros;
    use crate::targets::engine::{calculate, ActivityLevel, Goal};
    use time::macros::date;

    fn item(food: &str, grams: f64) -> MealItem {
        MealItem::from_portion(food.into(), grams, Macros::new(grams, 1.0, 1.0, 1.0))
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = MemoryStore::new();
        store.create_user("alice", "h").await.unwrap();
        let err = store.create_user("alice", "h2").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_meal_name_writes_nothing() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store
            .insert_meal(user, "Breakfast", &[item("Oats", 80.0)])
            .await
            .unwrap();

        let err = store
            .insert_meal(user, "Breakfast", &[item("Eggs", 120.0), item("Toast", 40.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let meal = store.find_meal(user, "Breakfast").await.unwrap().unwrap();
        assert_eq!(meal.items, vec![item("Oats", 80.0)]);
        assert_eq!(store.list_meal_names(user).await.unwrap(), vec!["Breakfast"]);
    }

    #[tokio::test]
    async fn same_meal_name_is_fine_for_another_user() {
        let store = MemoryStore::new();
        store
            .insert_meal(Uuid::new_v4(), "Lunch", &[item("Rice", 100.0)])
            .await
            .unwrap();
        store
            .insert_meal(Uuid::new_v4(), "Lunch", &[item("Rice", 100.0)])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn targets_are_upserted_not_appended() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert!(store.get_targets(user).await.unwrap().is_none());

        let mut profile = BodyProfile {
            weight_kg: 70.0,
            height_cm: 175.0,
            body_fat_pct: 20.0,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Maintain,
        };
        store
            .upsert_targets(user, &profile, &calculate(&profile).unwrap())
            .await
            .unwrap();

        profile.goal = Goal::Lose;
        let second = calculate(&profile).unwrap();
        store.upsert_targets(user, &profile, &second).await.unwrap();

        let stored = store.get_targets(user).await.unwrap().unwrap();
        assert_eq!(stored.targets, second);
        assert_eq!(stored.profile.goal, Goal::Lose);
    }

    #[tokio::test]
    async fn log_entries_are_scoped_by_user_and_day() {
        let store = MemoryStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let entry = |day| NewLogEntry {
            logged_on: day,
            food_name: "Oats".into(),
            grams: 50.0,
            macros: Macros::new(194.5, 8.45, 33.15, 3.45),
        };
        let kept = store.insert_log_entry(a, &entry(date!(2024 - 03 - 01))).await.unwrap();
        store.insert_log_entry(a, &entry(date!(2024 - 03 - 02))).await.unwrap();
        store.insert_log_entry(b, &entry(date!(2024 - 03 - 01))).await.unwrap();

        let day = store.list_log_entries(a, date!(2024 - 03 - 01)).await.unwrap();
        assert_eq!(day, vec![kept.clone()]);

        assert!(!store.delete_log_entry(b, kept.id).await.unwrap());
        assert!(store.delete_log_entry(a, kept.id).await.unwrap());
        assert!(store.list_log_entries(a, date!(2024 - 03 - 01)).await.unwrap().is_empty());
    }
}
