// src/db/inventory_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::inventory::{Category, CreateItemPayload, InventoryItem, StockTransaction, Supplier},
};

#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Itens
    // ---
    // Todas as funções aceitam um executor genérico: podem rodar direto na
    // pool ou dentro de uma transação aberta pelo serviço.

    /// Cria um item novo, carimbando created_at e updated_at com o mesmo instante.
    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        payload: &CreateItemPayload,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO items (sku, name, description, category, supplier,
                               quantity, price, reorder_level, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&payload.sku)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.category)
        .bind(&payload.supplier)
        .bind(payload.quantity)
        .bind(payload.price)
        .bind(payload.reorder_level)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte violação do índice único de SKU em erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists(payload.sku.clone());
                }
            }
            e.into()
        })
    }

    /// Lista todos os itens em ordem de inserção (id crescente).
    pub async fn get_all_items<'e, E>(&self, executor: E) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items = sqlx::query_as::<_, InventoryItem>("SELECT * FROM items ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(items)
    }

    /// Busca um item pelo id. Ausente não é erro: retorna None.
    pub async fn get_item_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, InventoryItem>("SELECT * FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    /// Busca pelo índice único de SKU (usado pelo loader de dados de exemplo).
    pub async fn get_item_by_sku<'e, E>(
        &self,
        executor: E,
        sku: &str,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, InventoryItem>("SELECT * FROM items WHERE sku = ?")
            .bind(sku)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    /// Substitui o registro inteiro (sem patch parcial), chaveado pelo id.
    /// O updated_at é carimbado aqui; o created_at original é preservado.
    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        item: &InventoryItem,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE items
            SET sku = ?, name = ?, description = ?, category = ?, supplier = ?,
                quantity = ?, price = ?, reorder_level = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&item.sku)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.category)
        .bind(&item.supplier)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.reorder_level)
        .bind(Utc::now())
        .bind(item.id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists(item.sku.clone());
                }
            }
            e.into()
        })?;

        updated.ok_or(AppError::NotFound)
    }

    /// Remove um item. Idempotente: apagar um id inexistente não é erro.
    pub async fn delete_item<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Busca por substring (case-insensitive) em name, description e sku,
    /// com filtro exato de categoria. Os dois filtros são opcionais e ANDados.
    /// É um scan da coleção inteira, sem índice full-text.
    ///
    /// Usa instr() em vez de LIKE: o termo é texto literal, '%' e '_'
    /// não são curingas.
    pub async fn search_items<'e, E>(
        &self,
        executor: E,
        search_term: &str,
        category: &str,
    ) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT * FROM items
            WHERE (?1 = ''
                   OR instr(lower(name), ?1) > 0
                   OR instr(lower(description), ?1) > 0
                   OR instr(lower(sku), ?1) > 0)
              AND (?2 = '' OR category = ?2)
            ORDER BY id ASC
            "#,
        )
        .bind(search_term.to_lowercase())
        .bind(category)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    /// Itens com quantity <= threshold. Corte fixo, independente do
    /// reorder_level de cada item (são duas políticas distintas).
    pub async fn get_low_stock_items<'e, E>(
        &self,
        executor: E,
        threshold: i64,
    ) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM items WHERE quantity <= ? ORDER BY id ASC",
        )
        .bind(threshold)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    // ---
    // Categorias
    // ---

    pub async fn create_category<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES (?) RETURNING *")
            .bind(name)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::CategoryNameAlreadyExists(name.to_string());
                    }
                }
                e.into()
            })
    }

    pub async fn get_all_categories<'e, E>(&self, executor: E) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(categories)
    }

    pub async fn get_category_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(category)
    }

    pub async fn update_category<'e, E>(
        &self,
        executor: E,
        category: &Category,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ? WHERE id = ? RETURNING *",
        )
        .bind(&category.name)
        .bind(category.id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::CategoryNameAlreadyExists(category.name.clone());
                }
            }
            e.into()
        })?;

        updated.ok_or(AppError::NotFound)
    }

    pub async fn delete_category<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // ---
    // Fornecedores
    // ---
    // Sem índice único: nomes repetidos são permitidos.

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let supplier =
            sqlx::query_as::<_, Supplier>("INSERT INTO suppliers (name) VALUES (?) RETURNING *")
                .bind(name)
                .fetch_one(executor)
                .await?;
        Ok(supplier)
    }

    pub async fn get_all_suppliers<'e, E>(&self, executor: E) -> Result<Vec<Supplier>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let suppliers = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(suppliers)
    }

    pub async fn get_supplier_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(supplier)
    }

    pub async fn update_supplier<'e, E>(
        &self,
        executor: E,
        supplier: &Supplier,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, Supplier>(
            "UPDATE suppliers SET name = ? WHERE id = ? RETURNING *",
        )
        .bind(&supplier.name)
        .bind(supplier.id)
        .fetch_optional(executor)
        .await?;

        updated.ok_or(AppError::NotFound)
    }

    pub async fn delete_supplier<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM suppliers WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // ---
    // Transações (livro-razão de auditoria)
    // ---

    /// Registra uma movimentação no histórico. A data é carimbada aqui,
    /// nunca fornecida pelo chamador. Append-only: não há update nem delete.
    pub async fn record_transaction<'e, E>(
        &self,
        executor: E,
        item_id: i64,
        item_name: &str,
        tx_type: &str,
        old_quantity: i64,
        new_quantity: i64,
    ) -> Result<StockTransaction, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let transaction = sqlx::query_as::<_, StockTransaction>(
            r#"
            INSERT INTO transactions (item_id, item_name, type,
                                      old_quantity, new_quantity, difference, date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(item_name)
        .bind(tx_type)
        .bind(old_quantity)
        .bind(new_quantity)
        .bind(new_quantity - old_quantity)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(transaction)
    }

    pub async fn get_all_transactions<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<StockTransaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let transactions =
            sqlx::query_as::<_, StockTransaction>("SELECT * FROM transactions ORDER BY id ASC")
                .fetch_all(executor)
                .await?;
        Ok(transactions)
    }

    pub async fn get_transaction_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<StockTransaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let transaction =
            sqlx::query_as::<_, StockTransaction>("SELECT * FROM transactions WHERE id = ?")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(transaction)
    }
}
