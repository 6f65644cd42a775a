// src/controllers/dashboard_controller.rs
use actix_web::{HttpResponse, get, web};
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::dashboard::{DebugInfo, HealthStatus, Statistik};

async fn hitung(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Gagal menghitung {}: {}", table, e);
            e
        })
}

#[get("/api/stats")]
pub async fn get_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let pool = pool.get_ref();

    let stats = Statistik {
        surat_count: hitung(pool, "surat_masuk").await?,
        disposisi_count: hitung(pool, "disposisi").await?,
        agenda_count: hitung(pool, "agenda").await?,
        agenda_kepala_count: hitung(pool, "agenda_kepala").await?,
    };

    Ok(HttpResponse::Ok().json(stats))
}

#[get("/api/health")]
pub async fn health(pool: web::Data<SqlitePool>, config: web::Data<AppConfig>) -> HttpResponse {
    let database = match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => "connected",
        Err(e) => {
            log::warn!("Health check database gagal: {}", e);
            "disconnected"
        }
    };

    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        database: database.to_string(),
        env: config.app_env.clone(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[get("/api/debug")]
pub async fn debug_info(config: web::Data<AppConfig>) -> HttpResponse {
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    HttpResponse::Ok().json(DebugInfo {
        upload_dir: config.upload_dir.display().to_string(),
        exists_uploads: config.upload_dir.is_dir(),
        cwd,
    })
}
