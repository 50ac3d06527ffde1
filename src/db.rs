use std::sync::Arc;

use actix_web::web::Data;
use sqlx::MySqlPool;

use crate::{
    config::{Config, StorageBackend},
    store::{
        AttendanceStore, RefreshTokenStore, UserDirectory, memory::MemoryStore,
        mysql::MySqlStore,
    },
};

pub async fn init_db(database_url: &str) -> MySqlPool {
    let pool = MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}

/// Handles to every storage seam, shared across workers.
#[derive(Clone)]
pub struct Stores {
    pub users: Data<dyn UserDirectory>,
    pub attendance: Data<dyn AttendanceStore>,
    pub tokens: Data<dyn RefreshTokenStore>,
}

impl Stores {
    fn from_backend<S>(store: Arc<S>) -> Self
    where
        S: UserDirectory + AttendanceStore + RefreshTokenStore + 'static,
    {
        let users: Arc<dyn UserDirectory> = store.clone();
        let attendance: Arc<dyn AttendanceStore> = store.clone();
        let tokens: Arc<dyn RefreshTokenStore> = store;
        Self {
            users: Data::from(users),
            attendance: Data::from(attendance),
            tokens: Data::from(tokens),
        }
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self::from_backend(store)
    }

    pub async fn connect(config: &Config) -> Self {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Self::memory(Arc::new(MemoryStore::new()))
            }
            StorageBackend::Mysql => {
                let url = config
                    .database_url
                    .as_deref()
                    .expect("DATABASE_URL must be set");
                Self::from_backend(Arc::new(MySqlStore::new(init_db(url).await)))
            }
        }
    }
}
