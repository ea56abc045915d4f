use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, event::EventRepositoryImpl, health::HealthCheckRepositoryImpl,
        registration::RegistrationRepositoryImpl, user::UserRepositoryImpl,
    },
    storage::LocalPhotoStorage,
};
use kernel::{
    repository::{
        auth::AuthRepository, event::EventRepository, health::HealthCheckRepository,
        photo::PhotoStorage, registration::RegistrationRepository, user::UserRepository,
    },
    service::registration::RegistrationService,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    event_repository: Arc<dyn EventRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    registration_service: Arc<RegistrationService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let registration_repository = Arc::new(RegistrationRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let photo_storage = Arc::new(LocalPhotoStorage::new(app_config.storage.media_root));

        Self::from_parts(
            health_check_repository,
            event_repository,
            user_repository,
            registration_repository,
            auth_repository,
            photo_storage,
        )
    }

    // 各リポジトリの実装を差し替えて組み立てる（テストではモックを渡す）
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        event_repository: Arc<dyn EventRepository>,
        user_repository: Arc<dyn UserRepository>,
        registration_repository: Arc<dyn RegistrationRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        photo_storage: Arc<dyn PhotoStorage>,
    ) -> Self {
        let registration_service = Arc::new(RegistrationService::new(
            event_repository.clone(),
            user_repository.clone(),
            registration_repository,
            photo_storage,
        ));
        Self {
            health_check_repository,
            event_repository,
            user_repository,
            auth_repository,
            registration_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn registration_service(&self) -> Arc<RegistrationService> {
        self.registration_service.clone()
    }
}
