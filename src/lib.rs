// Camada de dados do estoque do salão: os consumidores (UI/CLI) montam um
// AppState e chamam os serviços; toda a apresentação fica fora daqui.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
