use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::AuthConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, auth: Arc<AuthConfig>) -> Self {
        Self { db, auth }
    }
}
