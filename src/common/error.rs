use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha ao abrir o banco local: fatal, a sessão não deve continuar.
    #[error("Não foi possível abrir o banco de dados: {0}")]
    StoreUnavailable(String),

    #[error("SKU já existe: {0}")]
    SkuAlreadyExists(String),

    #[error("Nome de categoria já existe: {0}")]
    CategoryNameAlreadyExists(String),

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Variante para erros de banco de dados (sqlx). Propagado como veio,
    // sem retry: cada operação roda no máximo uma vez.
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// O consumidor precisa distinguir falha fatal (não abriu o banco)
    /// de erro recuperável (tudo o resto).
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}
