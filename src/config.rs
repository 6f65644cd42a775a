// src/config.rs
use std::{env, path::PathBuf};

/// Konfigurasi aplikasi, dibaca sekali saat startup lalu dibagikan lewat `web::Data`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub body_limit: usize,
    pub app_env: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://surat.db".to_string(),
            upload_dir: PathBuf::from("./uploads"),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origin: "http://localhost:5173".to_string(),
            body_limit: 50 * 1024 * 1024,
            app_env: "development".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Dipisah dari `from_env` supaya bisa dites tanpa menyentuh environment proses.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT").map(|v| v.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                log::warn!("PORT tidak valid ({}), memakai {}", e, default.port);
                default.port
            }
            None => default.port,
        };

        let body_limit = match get("BODY_LIMIT_MB").map(|v| v.parse::<usize>()) {
            Some(Ok(mb)) => match mb.checked_mul(1024 * 1024) {
                Some(bytes) => bytes,
                None => {
                    log::warn!("BODY_LIMIT_MB terlalu besar ({}), memakai 50MB", mb);
                    default.body_limit
                }
            },
            Some(Err(e)) => {
                log::warn!("BODY_LIMIT_MB tidak valid ({}), memakai 50MB", e);
                default.body_limit
            }
            None => default.body_limit,
        };

        Self {
            database_url: get("DATABASE_URL").unwrap_or(default.database_url),
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),
            host: get("HOST").unwrap_or(default.host),
            port,
            cors_origin: get("CORS_ORIGIN").unwrap_or(default.cors_origin),
            body_limit,
            app_env: get("APP_ENV").unwrap_or(default.app_env),
        }
    }
}
