use crate::{config::AppConfig, db::DbPool, services::trips::TripRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub trips: TripRepository,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool) -> Self {
        Self::with_repository(config, TripRepository::new(db))
    }

    pub fn with_repository(config: AppConfig, trips: TripRepository) -> Self {
        Self { config, trips }
    }
}
