// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// --- 1. Itens de Estoque ---
// O id é atribuído pelo banco (AUTOINCREMENT) e nunca muda depois de criado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: String,
    // Tag de categoria guardada por valor (referência "soft", sem FK).
    pub category: String,
    // Nome livre do fornecedor, também sem vínculo com a tabela suppliers.
    pub supplier: String,
    pub quantity: i64,
    pub price: f64,
    pub reorder_level: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Payload: CreateItem
// ---
// A validação de forma/faixa é responsabilidade do chamador (serviço),
// antes de chegar ao banco: o banco grava o que receber.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemPayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[serde(default)]
    pub supplier: String,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantity: i64,

    #[validate(range(min = 0.0, message = "O preço não pode ser negativo."))]
    pub price: f64,

    // Se o formulário não informar, assume 10.
    #[serde(default = "default_reorder_level")]
    #[validate(range(min = 0, message = "O nível de reposição não pode ser negativo."))]
    pub reorder_level: i64,
}

fn default_reorder_level() -> i64 {
    10
}

// --- 2. Categorias ---
// Vocabulário independente: apagar uma categoria não cascateia para os itens.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// --- 3. Fornecedores ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

// --- 4. Transações de Estoque (Histórico) ---
// Registro append-only: criado junto com cada ajuste de quantidade,
// nunca atualizado nem apagado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: i64,
    pub item_id: i64,
    // Snapshot denormalizado: o item pode ser apagado depois.
    pub item_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub tx_type: String,
    pub old_quantity: i64,
    pub new_quantity: i64,
    pub difference: i64,
    pub date: DateTime<Utc>,
}

// Tags usadas pelo fluxo padrão. O campo aceita qualquer tag do chamador,
// por isso é String e não enum.
pub mod transaction_type {
    pub const ADJUSTMENT: &str = "adjustment";
    pub const MANUAL_ADJUSTMENT: &str = "manual_adjustment";
}

// --- 5. Classificação de Estoque (por reorder_level do próprio item) ---
// Política distinta de low_stock_items(threshold), que usa um corte fixo.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    MediumStock,
    InStock,
}

impl StockStatus {
    /// Classifica a quantidade de um item contra o seu próprio reorder_level.
    pub fn classify(quantity: i64, reorder_level: i64) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= reorder_level {
            StockStatus::LowStock
        } else if quantity <= reorder_level * 2 {
            StockStatus::MediumStock
        } else {
            StockStatus::InStock
        }
    }
}

// --- 6. Estatísticas ---
// Visão derivada que o consumidor exibe nos cards do painel.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStatistics {
    pub total_items: i64,
    pub low_stock_items: i64,
    pub out_of_stock_items: i64,
    pub total_value: f64,
}
