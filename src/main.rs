//src/main.rs

use parlour_inventory::{config::AppState, db};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se o banco não abrir, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao abrir o banco de dados do estoque.");

    db::run_migrations(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Carrega o inventário canônico do salão (itens já existentes são mantidos).
    let created = app_state
        .seed_service
        .load_sample_data(&app_state.db_pool)
        .await
        .expect("Falha ao carregar os dados de exemplo.");

    tracing::info!("📦 Dados de exemplo carregados ({} itens novos).", created);

    let stats = app_state
        .inventory_service
        .statistics(&app_state.db_pool)
        .await
        .expect("Falha ao calcular as estatísticas do estoque.");

    tracing::info!(
        "Itens: {} | Estoque baixo: {} | Esgotados: {} | Valor total: ${:.2}",
        stats.total_items,
        stats.low_stock_items,
        stats.out_of_stock_items,
        stats.total_value
    );
}
