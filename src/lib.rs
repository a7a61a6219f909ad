pub mod app;
pub mod auth;
pub mod config;
pub mod daily_log;
pub mod error;
pub mod foods;
pub mod llm;
pub mod meal_plans;
pub mod meals;
pub mod nutrition;
pub mod settings;
pub mod state;
pub mod store;
pub mod targets;
