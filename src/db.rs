pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;

use crate::common::error::AppError;
use sqlx::SqlitePool;

/// Provisiona as quatro coleções e os índices na primeira abertura (e roda
/// qualquer migração pendente nas seguintes). Falha de schema é fatal.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))
}
