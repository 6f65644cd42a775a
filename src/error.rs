// src/error.rs
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("DB Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Gagal menyimpan file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lampiran base64 tidak valid: {0}")]
    Lampiran(#[from] base64::DecodeError),

    #[error("{0}")]
    Validasi(String),

    #[error("Payload error: {0}")]
    Payload(String),
}

impl AppError {
    pub fn validasi(msg: impl Into<String>) -> Self {
        AppError::Validasi(msg.into())
    }

    pub fn payload(msg: impl std::fmt::Display) -> Self {
        AppError::Payload(msg.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validasi(_) | AppError::Payload(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Io(_) | AppError::Lampiran(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
