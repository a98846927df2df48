// src/config.rs

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    services::{InventoryService, SeedService},
};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{env, str::FromStr, time::Duration};

// O estado compartilhado: o "handle" explícito do banco, injetado nos
// consumidores (nada de singleton global).
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub inventory_service: InventoryService,
    pub seed_service: SeedService,
}

impl AppState {
    // Carrega as configurações do ambiente e abre o banco local.
    pub async fn new() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        // Banco SQLite local; sem variável definida, usa o arquivo padrão.
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://beauty_parlour.db".to_string());

        Self::with_database_url(&database_url).await
    }

    pub async fn with_database_url(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?
            .create_if_missing(true);

        // Uma conexão só: SQLite local, single-process; as operações do
        // chamador ficam serializadas (é a pool quem garante isso).
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        tracing::info!("✅ Banco de dados local aberto com sucesso!");

        // --- Monta o gráfico de dependências ---
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let inventory_service = InventoryService::new(inventory_repo);
        let seed_service = SeedService::new(inventory_service.clone());

        Ok(Self {
            db_pool,
            inventory_service,
            seed_service,
        })
    }
}
