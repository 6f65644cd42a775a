// src/controllers/agenda_controller.rs
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::agenda::{Agenda, AgendaInput};
use crate::models::{Berhasil, Dibuat};
use crate::payload::read_masukan;

#[get("/api/agenda")]
pub async fn get_agenda(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let data = sqlx::query_as::<_, Agenda>(
        r#"
        SELECT id, nama_kegiatan, tanggal, waktu, lokasi, keterangan, pelaksana
        FROM agenda
        ORDER BY tanggal ASC, waktu ASC, id ASC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengambil agenda: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(data))
}

#[post("/api/agenda")]
pub async fn create_agenda(
    req: HttpRequest,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let input: AgendaInput = read_masukan(&req, payload, config.body_limit)
        .await?
        .parse()?;
    input.validasi()?;

    let result = sqlx::query(
        r#"
        INSERT INTO agenda (nama_kegiatan, tanggal, waktu, lokasi, keterangan, pelaksana)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.nama_kegiatan)
    .bind(&input.tanggal)
    .bind(&input.waktu)
    .bind(&input.lokasi)
    .bind(&input.keterangan)
    .bind(&input.pelaksana)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal menyimpan agenda: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Dibuat {
        id: result.last_insert_rowid(),
    }))
}

#[put("/api/agenda/{id}")]
pub async fn update_agenda(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input: AgendaInput = read_masukan(&req, payload, config.body_limit)
        .await?
        .parse()?;
    input.validasi()?;

    sqlx::query(
        r#"
        UPDATE agenda
        SET nama_kegiatan = ?, tanggal = ?, waktu = ?, lokasi = ?, keterangan = ?, pelaksana = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.nama_kegiatan)
    .bind(&input.tanggal)
    .bind(&input.waktu)
    .bind(&input.lokasi)
    .bind(&input.keterangan)
    .bind(&input.pelaksana)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengupdate agenda {}: {}", id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}

#[delete("/api/agenda/{id}")]
pub async fn delete_agenda(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    sqlx::query("DELETE FROM agenda WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            log::error!("Gagal menghapus agenda {}: {}", id, e);
            e
        })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}
