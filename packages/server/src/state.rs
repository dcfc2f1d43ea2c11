use std::sync::Arc;

use ai_client::ContentAnalyzer;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub analyzer: Arc<dyn ContentAnalyzer>,
}
