// src/services/inventory_service.rs

use sqlx::{Executor, Sqlite};
use validator::Validate;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{
        Category, CreateItemPayload, InventoryItem, InventoryStatistics, StockStatus,
        StockTransaction, Supplier,
    },
};

// Corte fixo do low_stock_items quando o chamador não informa um limite.
// Não confundir com o reorder_level de cada item (veja stock_status).
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository) -> Self {
        Self { inventory_repo }
    }

    // ---
    // Itens
    // ---

    /// Valida o payload (forma e faixas) e cria o item.
    /// O banco em si grava o que receber: a validação mora aqui.
    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        payload: &CreateItemPayload,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        payload.validate()?;
        self.inventory_repo.create_item(executor, payload).await
    }

    pub async fn get_all_items<'e, E>(&self, executor: E) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_all_items(executor).await
    }

    pub async fn get_item<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_item_by_id(executor, id).await
    }

    /// Busca pelo índice único de SKU (usada pelo loader de dados de exemplo).
    pub async fn get_item_by_sku<'e, E>(
        &self,
        executor: E,
        sku: &str,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_item_by_sku(executor, sku).await
    }

    /// Substituição completa do registro, chaveada pelo id.
    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        item: &InventoryItem,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.update_item(executor, item).await
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.delete_item(executor, id).await
    }

    /// Filtro de navegação: substring (sem case) em name/description/sku
    /// e categoria exata, ambos opcionais e ANDados.
    pub async fn search_items<'e, E>(
        &self,
        executor: E,
        search_term: &str,
        category: &str,
    ) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo
            .search_items(executor, search_term, category)
            .await
    }

    /// Itens com quantity <= threshold (padrão 10 quando não informado).
    pub async fn low_stock_items<'e, E>(
        &self,
        executor: E,
        threshold: Option<i64>,
    ) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo
            .get_low_stock_items(executor, threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD))
            .await
    }

    // --- UPDATE STOCK (operação composta) ---
    // Lê a quantidade atual, grava a nova e registra a transação de auditoria
    // dentro de UMA transação SQL cobrindo items + transactions: nenhum leitor
    // vê a quantidade nova sem o registro de histórico correspondente.
    pub async fn update_stock<'e, E>(
        &self,
        executor: E,
        item_id: i64,
        new_quantity: i64,
        tx_type: &str,
    ) -> Result<StockTransaction, AppError>
    where
        E: sqlx::Acquire<'e, Database = Sqlite>,
    {
        // Política adotada: quantidade negativa é rejeitada aqui, na camada
        // consumidora; as primitivas do banco gravam o valor como vier.
        if new_quantity < 0 {
            let mut errors = validator::ValidationErrors::new();
            let mut err = validator::ValidationError::new("range");
            err.message = Some("A quantidade não pode ser negativa.".into());
            errors.add("newQuantity", err);
            return Err(AppError::ValidationError(errors));
        }

        let mut tx = executor.begin().await?;

        let mut item = self
            .inventory_repo
            .get_item_by_id(&mut *tx, item_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let old_quantity = item.quantity;
        item.quantity = new_quantity;

        // 1. Grava a nova quantidade (também carimba o updated_at)
        let item = self.inventory_repo.update_item(&mut *tx, &item).await?;

        // 2. Grava o histórico
        let transaction = self
            .inventory_repo
            .record_transaction(&mut *tx, item.id, &item.name, tx_type, old_quantity, new_quantity)
            .await?;

        tx.commit().await?;
        Ok(transaction)
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
        self.inventory_repo.create_category(executor, name).await
    }

    pub async fn get_all_categories<'e, E>(&self, executor: E) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_all_categories(executor).await
    }

    pub async fn get_category<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_category_by_id(executor, id).await
    }

    pub async fn update_category<'e, E>(
        &self,
        executor: E,
        category: &Category,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.update_category(executor, category).await
    }

    /// Apagar categoria não cascateia: itens guardam a tag por valor.
    pub async fn delete_category<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.delete_category(executor, id).await
    }

    // ---
    // Fornecedores
    // ---

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.create_supplier(executor, name).await
    }

    pub async fn get_all_suppliers<'e, E>(&self, executor: E) -> Result<Vec<Supplier>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_all_suppliers(executor).await
    }

    pub async fn get_supplier<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_supplier_by_id(executor, id).await
    }

    pub async fn update_supplier<'e, E>(
        &self,
        executor: E,
        supplier: &Supplier,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.update_supplier(executor, supplier).await
    }

    pub async fn delete_supplier<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.delete_supplier(executor, id).await
    }

    // ---
    // Transações (histórico)
    // ---

    /// Primitiva crua de registro: normalmente o histórico nasce dentro do
    /// update_stock, mas o consumidor pode registrar um lançamento direto.
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
        self.inventory_repo
            .record_transaction(executor, item_id, item_name, tx_type, old_quantity, new_quantity)
            .await
    }

    pub async fn get_all_transactions<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<StockTransaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_all_transactions(executor).await
    }

    pub async fn get_transaction<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<StockTransaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.inventory_repo.get_transaction_by_id(executor, id).await
    }

    // ---
    // Visões derivadas
    // ---

    /// Classificação por item, usando o reorder_level do próprio item.
    pub fn stock_status(&self, item: &InventoryItem) -> StockStatus {
        StockStatus::classify(item.quantity, item.reorder_level)
    }

    /// Números dos cards do painel, calculados sobre a coleção inteira.
    pub async fn statistics<'e, E>(&self, executor: E) -> Result<InventoryStatistics, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items = self.inventory_repo.get_all_items(executor).await?;

        let mut low_stock_items = 0;
        let mut out_of_stock_items = 0;
        let mut total_value = 0.0;

        for item in &items {
            match self.stock_status(item) {
                StockStatus::LowStock => low_stock_items += 1,
                StockStatus::OutOfStock => out_of_stock_items += 1,
                _ => {}
            }
            total_value += item.quantity as f64 * item.price;
        }

        Ok(InventoryStatistics {
            total_items: items.len() as i64,
            low_stock_items,
            out_of_stock_items,
            total_value,
        })
    }
}
