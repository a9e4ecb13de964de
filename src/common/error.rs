use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia mapeia direto para os códigos HTTP do envelope de erro.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication token invalid or missing")]
    InvalidToken,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    // Variante para erros de banco de dados
    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Validação devolve os detalhes campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": {
                        "message": "One or more fields are invalid.",
                        "details": details,
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Please authenticate".to_string(),
            ),
            AppError::AccessDenied(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{} not found", what))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),

            // Todos os outros viram 500. A mensagem detalhada fica no log
            // do servidor; o cliente recebe um texto genérico.
            ref e => {
                tracing::error!("Internal server error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        // Envelope padrão de erro: { "error": { "message": ... } }
        let body = Json(json!({ "error": { "message": error_message } }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_denied_body_carries_only_the_message() {
        let response =
            AppError::AccessDenied("Access denied to this project".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        let cases = vec![
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AppError::AccessDenied("x".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("Employee"), StatusCode::NOT_FOUND),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                AppError::Pdf("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
