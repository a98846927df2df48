// src/services/seed_service.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    models::inventory::CreateItemPayload,
    services::InventoryService,
};

struct SampleItem {
    sku: &'static str,
    name: &'static str,
    category: &'static str,
    supplier: &'static str,
    quantity: i64,
    price: f64,
    reorder_level: i64,
    description: &'static str,
}

// Vocabulário de categorias do salão (as tags que os itens guardam por valor).
const SAMPLE_CATEGORIES: [&str; 6] = [
    "hair-care",
    "skincare",
    "makeup",
    "nail-care",
    "tools",
    "cleaning",
];

const SAMPLE_ITEMS: [SampleItem; 20] = [
    SampleItem {
        sku: "HC001",
        name: "Professional Shampoo",
        category: "hair-care",
        supplier: "Beauty Supply Co.",
        quantity: 25,
        price: 15.99,
        reorder_level: 10,
        description: "Professional grade shampoo for all hair types",
    },
    SampleItem {
        sku: "SK001",
        name: "Face Cleanser",
        category: "skincare",
        supplier: "Skincare Pro",
        quantity: 8,
        price: 22.50,
        reorder_level: 10,
        description: "Gentle facial cleanser for daily use",
    },
    SampleItem {
        sku: "MK001",
        name: "Foundation - Natural",
        category: "makeup",
        supplier: "Makeup Pro",
        quantity: 15,
        price: 18.75,
        reorder_level: 8,
        description: "Liquid foundation with SPF 15",
    },
    SampleItem {
        sku: "NC001",
        name: "Nail Polish Red",
        category: "nail-care",
        supplier: "Nail Supplies",
        quantity: 0,
        price: 8.99,
        reorder_level: 5,
        description: "Classic red nail polish",
    },
    SampleItem {
        sku: "TL001",
        name: "Hair Cutting Scissors",
        category: "tools",
        supplier: "Pro Tools",
        quantity: 5,
        price: 45.00,
        reorder_level: 2,
        description: "Professional hair cutting scissors",
    },
    SampleItem {
        sku: "HC002",
        name: "Hair Conditioner",
        category: "hair-care",
        supplier: "Beauty Supply Co.",
        quantity: 20,
        price: 12.99,
        reorder_level: 8,
        description: "Moisturizing conditioner for treated hair",
    },
    SampleItem {
        sku: "HC003",
        name: "Hair Color - Black",
        category: "hair-care",
        supplier: "Color Pro",
        quantity: 12,
        price: 8.50,
        reorder_level: 6,
        description: "Permanent hair color kit",
    },
    SampleItem {
        sku: "HC004",
        name: "Hair Spray",
        category: "hair-care",
        supplier: "Beauty Supply Co.",
        quantity: 18,
        price: 6.99,
        reorder_level: 10,
        description: "Extra hold hair spray",
    },
    SampleItem {
        sku: "SK002",
        name: "Face Moisturizer",
        category: "skincare",
        supplier: "Skincare Pro",
        quantity: 14,
        price: 25.99,
        reorder_level: 8,
        description: "Daily moisturizer with vitamin E",
    },
    SampleItem {
        sku: "SK003",
        name: "Face Mask - Hydrating",
        category: "skincare",
        supplier: "Skincare Pro",
        quantity: 25,
        price: 4.99,
        reorder_level: 15,
        description: "Single use hydrating face masks",
    },
    SampleItem {
        sku: "MK002",
        name: "Lipstick - Red",
        category: "makeup",
        supplier: "Makeup Pro",
        quantity: 20,
        price: 12.50,
        reorder_level: 10,
        description: "Classic red lipstick",
    },
    SampleItem {
        sku: "MK003",
        name: "Mascara - Black",
        category: "makeup",
        supplier: "Makeup Pro",
        quantity: 16,
        price: 10.99,
        reorder_level: 8,
        description: "Waterproof mascara",
    },
    SampleItem {
        sku: "NC002",
        name: "Nail File",
        category: "nail-care",
        supplier: "Nail Supplies",
        quantity: 30,
        price: 2.99,
        reorder_level: 20,
        description: "Emery nail files",
    },
    SampleItem {
        sku: "NC003",
        name: "Cuticle Oil",
        category: "nail-care",
        supplier: "Nail Supplies",
        quantity: 10,
        price: 7.50,
        reorder_level: 5,
        description: "Nourishing cuticle oil",
    },
    SampleItem {
        sku: "TL002",
        name: "Hair Dryer",
        category: "tools",
        supplier: "Pro Tools",
        quantity: 3,
        price: 89.99,
        reorder_level: 1,
        description: "Professional hair dryer",
    },
    SampleItem {
        sku: "TL003",
        name: "Curling Iron",
        category: "tools",
        supplier: "Pro Tools",
        quantity: 4,
        price: 65.00,
        reorder_level: 2,
        description: "1 inch curling iron",
    },
    SampleItem {
        sku: "CL001",
        name: "Disinfectant Spray",
        category: "cleaning",
        supplier: "Clean Supply",
        quantity: 8,
        price: 9.99,
        reorder_level: 5,
        description: "Tool disinfectant spray",
    },
    SampleItem {
        sku: "CL002",
        name: "Hand Sanitizer",
        category: "cleaning",
        supplier: "Clean Supply",
        quantity: 15,
        price: 3.99,
        reorder_level: 10,
        description: "Hand sanitizer bottles",
    },
    SampleItem {
        sku: "HC005",
        name: "Hair Gel",
        category: "hair-care",
        supplier: "Beauty Supply Co.",
        quantity: 22,
        price: 5.99,
        reorder_level: 12,
        description: "Strong hold hair gel",
    },
    SampleItem {
        sku: "SK004",
        name: "Sunscreen SPF 50",
        category: "skincare",
        supplier: "Skincare Pro",
        quantity: 18,
        price: 14.99,
        reorder_level: 10,
        description: "Broad spectrum sunscreen",
    },
];

#[derive(Debug, Clone)]
pub struct SeedService {
    inventory_service: InventoryService,
}

impl SeedService {
    pub fn new(inventory_service: InventoryService) -> Self {
        Self { inventory_service }
    }

    /// Carrega o inventário canônico do salão: laço sequencial de operações
    /// independentes, SEM transação englobando o lote (uma falha no meio
    /// deixa os registros anteriores criados).
    ///
    /// Cada item é checado pelo índice único de SKU antes do create; duplicado
    /// vira skip com warn. (A versão anterior tentava "consertar" o duplicado
    /// com um update chaveado por SKU contra a primitiva chaveada por id, o
    /// que virava no-op silencioso; preferimos o skip explícito.)
    ///
    /// Retorna quantos itens novos foram criados.
    pub async fn load_sample_data(&self, pool: &SqlitePool) -> Result<usize, AppError> {
        for name in SAMPLE_CATEGORIES {
            match self.inventory_service.create_category(pool, name).await {
                Ok(_) => {}
                Err(AppError::CategoryNameAlreadyExists(_)) => {
                    tracing::debug!("Categoria '{}' já existe, mantendo.", name);
                }
                Err(e) => return Err(e),
            }
        }

        let mut created = 0;
        for sample in &SAMPLE_ITEMS {
            let existing = self
                .inventory_service
                .get_item_by_sku(pool, sample.sku)
                .await?;

            if existing.is_some() {
                tracing::warn!("Item de exemplo '{}' já existe, mantendo o registro atual.", sample.sku);
                continue;
            }

            let payload = CreateItemPayload {
                sku: sample.sku.to_string(),
                name: sample.name.to_string(),
                description: sample.description.to_string(),
                category: sample.category.to_string(),
                supplier: sample.supplier.to_string(),
                quantity: sample.quantity,
                price: sample.price,
                reorder_level: sample.reorder_level,
            };

            self.inventory_service.create_item(pool, &payload).await?;
            created += 1;
        }

        Ok(created)
    }
}
