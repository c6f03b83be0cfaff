use crate::common::error::AppError;

// ---
// Helpers de tradução de erros do Postgres
// ---

/// Nome da constraint violada, se o erro for uma violação de chave única
/// ou estrangeira.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
            return db_err.constraint();
        }
    }
    None
}

/// Converte um `sqlx::Error` em `AppError`. `classify` recebe o nome da
/// constraint violada e devolve o erro de domínio correspondente.
pub(crate) fn map_constraint<F>(err: sqlx::Error, classify: F) -> AppError
where
    F: FnOnce(&str) -> Option<AppError>,
{
    let domain_error = violated_constraint(&err).and_then(classify);
    domain_error.unwrap_or_else(|| err.into())
}
