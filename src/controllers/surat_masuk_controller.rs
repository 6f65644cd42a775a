// src/controllers/surat_masuk_controller.rs
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::surat_masuk::{SearchQuery, SuratMasuk, SuratMasukInput};
use crate::models::{Berhasil, Dibuat};
use crate::payload::read_masukan;

#[get("/api/surat-masuk")]
pub async fn get_surat_masuk(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let data = sqlx::query_as::<_, SuratMasuk>(
        r#"
        SELECT id, no_agenda, no_surat, tgl_surat, tgl_diterima, asal_surat, perihal,
               keterangan, file_path, created_at
        FROM surat_masuk
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengambil surat masuk: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(data))
}

/// Escape `%`, `_` dan `\` supaya LIKE jadi pencarian substring biasa.
fn escape_like(q: &str) -> String {
    let mut out = String::with_capacity(q.len());
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[get("/api/search-surat")]
pub async fn search_surat(
    pool: web::Data<SqlitePool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let pola = format!("%{}%", escape_like(&query.q));

    let data = sqlx::query_as::<_, SuratMasuk>(
        r#"
        SELECT id, no_agenda, no_surat, tgl_surat, tgl_diterima, asal_surat, perihal,
               keterangan, file_path, created_at
        FROM surat_masuk
        WHERE no_surat LIKE ? ESCAPE '\'
           OR perihal LIKE ? ESCAPE '\'
           OR asal_surat LIKE ? ESCAPE '\'
           OR no_agenda LIKE ? ESCAPE '\'
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(&pola)
    .bind(&pola)
    .bind(&pola)
    .bind(&pola)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mencari surat '{}': {}", query.q, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(data))
}

#[post("/api/surat-masuk")]
pub async fn create_surat_masuk(
    req: HttpRequest,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let masukan = read_masukan(&req, payload, config.body_limit).await?;
    log::info!(
        "POST /api/surat-masuk - {} field, lampiran: {}",
        masukan.fields.len(),
        masukan.lampiran.as_ref().map_or("-", |l| l.nama())
    );

    let input: SuratMasukInput = masukan.parse()?;
    input.validasi()?;

    // File ditulis dulu; kalau insert gagal file tetap tertinggal
    let file_path = match &masukan.lampiran {
        Some(lampiran) => Some(lampiran.simpan(&config.upload_dir).await?),
        None => None,
    };

    let result = sqlx::query(
        r#"
        INSERT INTO surat_masuk
            (no_agenda, no_surat, tgl_surat, tgl_diterima, asal_surat, perihal, keterangan, file_path)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.no_agenda)
    .bind(&input.no_surat)
    .bind(&input.tgl_surat)
    .bind(&input.tgl_diterima)
    .bind(&input.asal_surat)
    .bind(&input.perihal)
    .bind(&input.keterangan)
    .bind(&file_path)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal menyimpan surat masuk: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Dibuat {
        id: result.last_insert_rowid(),
    }))
}

#[put("/api/surat-masuk/{id}")]
pub async fn update_surat_masuk(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let masukan = read_masukan(&req, payload, config.body_limit).await?;
    let input: SuratMasukInput = masukan.parse()?;
    input.validasi()?;

    // File lama tidak dihapus saat diganti
    let file_path = match &masukan.lampiran {
        Some(lampiran) => Some(lampiran.simpan(&config.upload_dir).await?),
        None => None,
    };

    let query = match file_path {
        Some(ref path) => sqlx::query(
            r#"
            UPDATE surat_masuk
            SET no_agenda = ?, no_surat = ?, tgl_surat = ?, tgl_diterima = ?,
                asal_surat = ?, perihal = ?, keterangan = ?, file_path = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.no_agenda)
        .bind(&input.no_surat)
        .bind(&input.tgl_surat)
        .bind(&input.tgl_diterima)
        .bind(&input.asal_surat)
        .bind(&input.perihal)
        .bind(&input.keterangan)
        .bind(path)
        .bind(id),
        None => sqlx::query(
            r#"
            UPDATE surat_masuk
            SET no_agenda = ?, no_surat = ?, tgl_surat = ?, tgl_diterima = ?,
                asal_surat = ?, perihal = ?, keterangan = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.no_agenda)
        .bind(&input.no_surat)
        .bind(&input.tgl_surat)
        .bind(&input.tgl_diterima)
        .bind(&input.asal_surat)
        .bind(&input.perihal)
        .bind(&input.keterangan)
        .bind(id),
    };

    query.execute(pool.get_ref()).await.map_err(|e| {
        log::error!("Gagal mengupdate surat masuk {}: {}", id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}

#[delete("/api/surat-masuk/{id}")]
pub async fn delete_surat_masuk(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    // Disposisi ikut terhapus lewat ON DELETE CASCADE, lampiran dibiarkan
    sqlx::query("DELETE FROM surat_masuk WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            log::error!("Gagal menghapus surat masuk {}: {}", id, e);
            e
        })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}
