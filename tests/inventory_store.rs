// tests/inventory_store.rs
//
// Testes de integração da camada de dados, rodando contra um SQLite em
// memória com as mesmas migrações do banco real.

use parlour_inventory::{
    common::AppError,
    config::AppState,
    db,
    models::inventory::{transaction_type, Category, CreateItemPayload, StockStatus, Supplier},
};

async fn test_state() -> AppState {
    let state = AppState::with_database_url("sqlite::memory:")
        .await
        .expect("abrir banco em memória");
    db::run_migrations(&state.db_pool)
        .await
        .expect("rodar migrações");
    state
}

fn shampoo_payload() -> CreateItemPayload {
    CreateItemPayload {
        sku: "HC001".to_string(),
        name: "Professional Shampoo".to_string(),
        description: "Professional grade shampoo for all hair types".to_string(),
        category: "hair-care".to_string(),
        supplier: "Beauty Supply Co.".to_string(),
        quantity: 25,
        price: 15.99,
        reorder_level: 10,
    }
}

fn conditioner_payload() -> CreateItemPayload {
    CreateItemPayload {
        sku: "HC002".to_string(),
        name: "Hair Conditioner".to_string(),
        description: "Moisturizing conditioner for treated hair".to_string(),
        category: "hair-care".to_string(),
        supplier: "Beauty Supply Co.".to_string(),
        quantity: 20,
        price: 12.99,
        reorder_level: 8,
    }
}

#[tokio::test]
async fn create_item_assigns_id_and_stamps_timestamps() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    assert!(item.id > 0);
    assert_eq!(item.created_at, item.updated_at);

    let all = svc.get_all_items(&state.db_pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].sku, "HC001");
    assert_eq!(all[0].quantity, 25);
}

#[tokio::test]
async fn duplicate_sku_is_rejected() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    svc.create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    let mut dup = shampoo_payload();
    dup.name = "Outro Shampoo".to_string();
    let err = svc.create_item(&state.db_pool, &dup).await.unwrap_err();

    assert!(matches!(err, AppError::SkuAlreadyExists(ref sku) if sku == "HC001"));

    // Só o primeiro registro existe.
    let all = svc.get_all_items(&state.db_pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn create_item_rejects_invalid_payload() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let mut bad = shampoo_payload();
    bad.quantity = -1;
    let err = svc.create_item(&state.db_pool, &bad).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let mut bad = shampoo_payload();
    bad.sku = String::new();
    let err = svc.create_item(&state.db_pool, &bad).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn update_stock_applies_quantity_and_records_audit() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    let transaction = svc
        .update_stock(
            &state.db_pool,
            item.id,
            10,
            transaction_type::MANUAL_ADJUSTMENT,
        )
        .await
        .unwrap();

    assert_eq!(transaction.item_id, item.id);
    assert_eq!(transaction.item_name, "Professional Shampoo");
    assert_eq!(transaction.tx_type, "manual_adjustment");
    assert_eq!(transaction.old_quantity, 25);
    assert_eq!(transaction.new_quantity, 10);
    assert_eq!(transaction.difference, -15);

    // A quantidade nova e o histórico aparecem juntos.
    let reloaded = svc.get_item(&state.db_pool, item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.quantity, 10);
    assert!(reloaded.updated_at >= reloaded.created_at);

    let history = svc.get_all_transactions(&state.db_pool).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, transaction.id);
}

#[tokio::test]
async fn update_stock_rejects_negative_quantity() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    let err = svc
        .update_stock(&state.db_pool, item.id, -1, transaction_type::ADJUSTMENT)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // Nada foi gravado: nem quantidade, nem histórico.
    let reloaded = svc.get_item(&state.db_pool, item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.quantity, 25);
    let history = svc.get_all_transactions(&state.db_pool).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn update_stock_on_missing_item_is_not_found() {
    let state = test_state().await;

    let err = state
        .inventory_service
        .update_stock(&state.db_pool, 9999, 5, transaction_type::ADJUSTMENT)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn update_on_missing_item_is_not_found() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let mut item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();
    svc.delete_item(&state.db_pool, item.id).await.unwrap();

    item.name = "Fantasma".to_string();
    let err = svc.update_item(&state.db_pool, &item).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn update_item_replaces_full_record() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let mut item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    item.name = "Professional Shampoo XL".to_string();
    item.price = 19.99;
    item.reorder_level = 12;

    let updated = svc.update_item(&state.db_pool, &item).await.unwrap();

    assert_eq!(updated.id, item.id);
    assert_eq!(updated.name, "Professional Shampoo XL");
    assert_eq!(updated.price, 19.99);
    assert_eq!(updated.reorder_level, 12);
    assert_eq!(updated.created_at, item.created_at);
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    svc.delete_item(&state.db_pool, item.id).await.unwrap();
    // Apagar de novo não é erro.
    svc.delete_item(&state.db_pool, item.id).await.unwrap();

    assert!(svc.get_item(&state.db_pool, item.id).await.unwrap().is_none());
}

#[tokio::test]
async fn search_matches_name_description_and_sku() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    svc.create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();
    svc.create_item(&state.db_pool, &conditioner_payload())
        .await
        .unwrap();

    // Substring no nome, sem diferenciar maiúsculas.
    let found = svc.search_items(&state.db_pool, "SHAMPOO", "").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sku, "HC001");

    // Substring no SKU pega os dois.
    let found = svc.search_items(&state.db_pool, "hc00", "").await.unwrap();
    assert_eq!(found.len(), 2);

    // Substring na descrição.
    let found = svc
        .search_items(&state.db_pool, "moisturizing", "")
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sku, "HC002");

    // Categoria é igualdade exata, e os filtros são ANDados.
    let found = svc
        .search_items(&state.db_pool, "", "hair-care")
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let found = svc
        .search_items(&state.db_pool, "shampoo", "skincare")
        .await
        .unwrap();
    assert!(found.is_empty());

    // Sem filtro nenhum, volta tudo.
    let found = svc.search_items(&state.db_pool, "", "").await.unwrap();
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn search_treats_wildcards_as_literal_text() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    svc.create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    let mut promo = conditioner_payload();
    promo.description = "Promoção 50%_off enquanto durar".to_string();
    svc.create_item(&state.db_pool, &promo).await.unwrap();

    // '%' e '_' são texto comum no termo, não curingas:
    // "P%o" não é substring de "Professional Shampoo".
    let found = svc.search_items(&state.db_pool, "P%o", "").await.unwrap();
    assert!(found.is_empty());

    let found = svc.search_items(&state.db_pool, "_", "").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sku, "HC002");

    // E a busca literal pelo trecho com '%' funciona.
    let found = svc.search_items(&state.db_pool, "50%_off", "").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sku, "HC002");
}

#[tokio::test]
async fn low_stock_uses_flat_threshold() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    for (sku, quantity) in [("A001", 25), ("A002", 8), ("A003", 0), ("A004", 15)] {
        let mut payload = shampoo_payload();
        payload.sku = sku.to_string();
        payload.name = format!("Item {sku}");
        payload.quantity = quantity;
        svc.create_item(&state.db_pool, &payload).await.unwrap();
    }

    let low = svc.low_stock_items(&state.db_pool, Some(10)).await.unwrap();
    let skus: Vec<&str> = low.iter().map(|i| i.sku.as_str()).collect();
    assert_eq!(skus, vec!["A002", "A003"]);

    // Sem argumento, vale o corte padrão (10).
    let low_default = svc.low_stock_items(&state.db_pool, None).await.unwrap();
    assert_eq!(low_default.len(), 2);
}

#[tokio::test]
async fn category_name_is_unique() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    svc.create_category(&state.db_pool, "hair-care").await.unwrap();
    let err = svc
        .create_category(&state.db_pool, "hair-care")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::CategoryNameAlreadyExists(ref name) if name == "hair-care"));
}

#[tokio::test]
async fn category_crud_roundtrip() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let category = svc.create_category(&state.db_pool, "makeup").await.unwrap();
    assert!(
        svc.get_category(&state.db_pool, category.id)
            .await
            .unwrap()
            .is_some()
    );

    let renamed = svc
        .update_category(
            &state.db_pool,
            &Category {
                id: category.id,
                name: "maquiagem".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "maquiagem");

    svc.delete_category(&state.db_pool, category.id).await.unwrap();
    svc.delete_category(&state.db_pool, category.id).await.unwrap();
    assert!(
        svc.get_category(&state.db_pool, category.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn deleting_category_does_not_cascade_to_items() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let category = svc.create_category(&state.db_pool, "hair-care").await.unwrap();
    let item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();

    svc.delete_category(&state.db_pool, category.id).await.unwrap();

    // O item guarda a tag por valor, então ela sobrevive.
    let reloaded = svc.get_item(&state.db_pool, item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.category, "hair-care");
}

#[tokio::test]
async fn supplier_names_are_not_unique() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let first = svc.create_supplier(&state.db_pool, "Pro Tools").await.unwrap();
    let second = svc.create_supplier(&state.db_pool, "Pro Tools").await.unwrap();
    assert_ne!(first.id, second.id);

    let renamed = svc
        .update_supplier(
            &state.db_pool,
            &Supplier {
                id: first.id,
                name: "Pro Tools Ltda".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Pro Tools Ltda");

    svc.delete_supplier(&state.db_pool, second.id).await.unwrap();
    let all = svc.get_all_suppliers(&state.db_pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn raw_transaction_does_not_require_existing_item() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    // item_id é referência "soft": vale registrar contra um id que não existe.
    let transaction = svc
        .record_transaction(
            &state.db_pool,
            42,
            "Ghost Item",
            transaction_type::ADJUSTMENT,
            5,
            7,
        )
        .await
        .unwrap();

    assert_eq!(transaction.difference, 2);
    assert_eq!(transaction.tx_type, "adjustment");

    let reloaded = svc
        .get_transaction(&state.db_pool, transaction.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.item_name, "Ghost Item");
    assert_eq!(reloaded.date, transaction.date);
}

#[tokio::test]
async fn sample_loader_is_idempotent() {
    let state = test_state().await;

    let created = state
        .seed_service
        .load_sample_data(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(created, 20);

    // Segunda rodada não duplica nada.
    let created_again = state
        .seed_service
        .load_sample_data(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(created_again, 0);

    let items = state
        .inventory_service
        .get_all_items(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(items.len(), 20);

    let categories = state
        .inventory_service
        .get_all_categories(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(categories.len(), 6);
}

#[tokio::test]
async fn statistics_over_sample_data() {
    let state = test_state().await;
    state
        .seed_service
        .load_sample_data(&state.db_pool)
        .await
        .unwrap();

    let stats = state
        .inventory_service
        .statistics(&state.db_pool)
        .await
        .unwrap();

    assert_eq!(stats.total_items, 20);
    // NC001 é o único com quantidade zero.
    assert_eq!(stats.out_of_stock_items, 1);
    // Estoque baixo usa o reorder_level de cada item (0 < qty <= reorder);
    // no conjunto de exemplo só o SK001 (8 <= 10) se encaixa.
    assert_eq!(stats.low_stock_items, 1);
    assert!(stats.total_value > 0.0);
}

#[tokio::test]
async fn open_failure_is_fatal_other_errors_are_not() {
    // Diretório inexistente: o create_if_missing não cria pais, então a
    // abertura falha e vira o único erro fatal da sessão.
    let err = AppState::with_database_url("sqlite:///caminho/inexistente/estoque.db")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)));
    assert!(err.is_fatal());

    // Todo o resto é recuperável: o consumidor reporta e segue.
    assert!(!AppError::NotFound.is_fatal());
    assert!(!AppError::SkuAlreadyExists("HC001".to_string()).is_fatal());
    assert!(!AppError::CategoryNameAlreadyExists("hair-care".to_string()).is_fatal());
}

#[test]
fn stock_status_classification_boundaries() {
    assert_eq!(StockStatus::classify(0, 10), StockStatus::OutOfStock);
    assert_eq!(StockStatus::classify(1, 10), StockStatus::LowStock);
    assert_eq!(StockStatus::classify(10, 10), StockStatus::LowStock);
    assert_eq!(StockStatus::classify(11, 10), StockStatus::MediumStock);
    assert_eq!(StockStatus::classify(20, 10), StockStatus::MediumStock);
    assert_eq!(StockStatus::classify(21, 10), StockStatus::InStock);
}

#[tokio::test]
async fn records_serialize_in_camel_case() {
    let state = test_state().await;
    let svc = &state.inventory_service;

    let item = svc
        .create_item(&state.db_pool, &shampoo_payload())
        .await
        .unwrap();
    let transaction = svc
        .update_stock(&state.db_pool, item.id, 10, transaction_type::ADJUSTMENT)
        .await
        .unwrap();

    let item_json = serde_json::to_value(&item).unwrap();
    assert!(item_json.get("reorderLevel").is_some());
    assert!(item_json.get("createdAt").is_some());

    let tx_json = serde_json::to_value(&transaction).unwrap();
    assert_eq!(tx_json["type"], "adjustment");
    assert_eq!(tx_json["oldQuantity"], 25);
    assert_eq!(tx_json["newQuantity"], 10);
    assert_eq!(tx_json["difference"], -15);
}
