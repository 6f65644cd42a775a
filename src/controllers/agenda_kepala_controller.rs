// src/controllers/agenda_kepala_controller.rs
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::agenda::{AgendaKepala, AgendaKepalaInput};
use crate::models::{Berhasil, Dibuat};
use crate::payload::read_masukan;

#[get("/api/agenda-kepala")]
pub async fn get_agenda_kepala(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let data = sqlx::query_as::<_, AgendaKepala>(
        r#"
        SELECT id, nama_kegiatan, tanggal, waktu, lokasi, keterangan
        FROM agenda_kepala
        ORDER BY tanggal ASC, waktu ASC, id ASC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengambil agenda kepala: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(data))
}

#[post("/api/agenda-kepala")]
pub async fn create_agenda_kepala(
    req: HttpRequest,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let input: AgendaKepalaInput = read_masukan(&req, payload, config.body_limit)
        .await?
        .parse()?;
    input.validasi()?;

    let result = sqlx::query(
        r#"
        INSERT INTO agenda_kepala (nama_kegiatan, tanggal, waktu, lokasi, keterangan)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.nama_kegiatan)
    .bind(&input.tanggal)
    .bind(&input.waktu)
    .bind(&input.lokasi)
    .bind(&input.keterangan)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal menyimpan agenda kepala: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Dibuat {
        id: result.last_insert_rowid(),
    }))
}

#[put("/api/agenda-kepala/{id}")]
pub async fn update_agenda_kepala(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input: AgendaKepalaInput = read_masukan(&req, payload, config.body_limit)
        .await?
        .parse()?;
    input.validasi()?;

    sqlx::query(
        r#"
        UPDATE agenda_kepala
        SET nama_kegiatan = ?, tanggal = ?, waktu = ?, lokasi = ?, keterangan = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.nama_kegiatan)
    .bind(&input.tanggal)
    .bind(&input.waktu)
    .bind(&input.lokasi)
    .bind(&input.keterangan)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengupdate agenda kepala {}: {}", id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}

#[delete("/api/agenda-kepala/{id}")]
pub async fn delete_agenda_kepala(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    sqlx::query("DELETE FROM agenda_kepala WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            log::error!("Gagal menghapus agenda kepala {}: {}", id, e);
            e
        })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}
