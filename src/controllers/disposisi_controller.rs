// src/controllers/disposisi_controller.rs
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::disposisi::{Disposisi, DisposisiInput};
use crate::models::{Berhasil, Dibuat};
use crate::payload::read_masukan;

#[get("/api/disposisi")]
pub async fn get_disposisi(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let data = sqlx::query_as::<_, Disposisi>(
        r#"
        SELECT d.id, d.surat_id, COALESCE(d.tujuan, '') AS tujuan, d.isi,
               COALESCE(d.sifat, '') AS sifat, d.batas_waktu, d.catatan,
               s.no_surat, s.perihal
        FROM disposisi d
        JOIN surat_masuk s ON d.surat_id = s.id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengambil disposisi: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(data))
}

#[get("/api/disposisi/{surat_id}")]
pub async fn get_disposisi_by_surat(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let surat_id = path.into_inner();

    let data = sqlx::query_as::<_, Disposisi>(
        r#"
        SELECT d.id, d.surat_id, COALESCE(d.tujuan, '') AS tujuan, d.isi,
               COALESCE(d.sifat, '') AS sifat, d.batas_waktu, d.catatan,
               s.no_surat, s.perihal
        FROM disposisi d
        JOIN surat_masuk s ON d.surat_id = s.id
        WHERE d.surat_id = ?
        ORDER BY d.id
        "#,
    )
    .bind(surat_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengambil disposisi surat {}: {}", surat_id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(data))
}

#[post("/api/disposisi")]
pub async fn create_disposisi(
    req: HttpRequest,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let input: DisposisiInput = read_masukan(&req, payload, config.body_limit)
        .await?
        .parse()?;
    input.validasi()?;

    let result = sqlx::query(
        r#"
        INSERT INTO disposisi (surat_id, tujuan, isi, sifat, batas_waktu, catatan)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(input.surat_id)
    .bind(input.tujuan.to_stored())
    .bind(&input.isi)
    .bind(input.sifat.label())
    .bind(&input.batas_waktu)
    .bind(&input.catatan)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal menyimpan disposisi untuk surat {}: {}", input.surat_id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Dibuat {
        id: result.last_insert_rowid(),
    }))
}

#[put("/api/disposisi/{id}")]
pub async fn update_disposisi(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: web::Payload,
    pool: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input: DisposisiInput = read_masukan(&req, payload, config.body_limit)
        .await?
        .parse()?;
    input.validasi()?;

    sqlx::query(
        r#"
        UPDATE disposisi
        SET surat_id = ?, tujuan = ?, isi = ?, sifat = ?, batas_waktu = ?, catatan = ?
        WHERE id = ?
        "#,
    )
    .bind(input.surat_id)
    .bind(input.tujuan.to_stored())
    .bind(&input.isi)
    .bind(input.sifat.label())
    .bind(&input.batas_waktu)
    .bind(&input.catatan)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("Gagal mengupdate disposisi {}: {}", id, e);
        e
    })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}

#[delete("/api/disposisi/{id}")]
pub async fn delete_disposisi(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    sqlx::query("DELETE FROM disposisi WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            log::error!("Gagal menghapus disposisi {}: {}", id, e);
            e
        })?;

    Ok(HttpResponse::Ok().json(Berhasil::OK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::disposisi::{Penerima, Sifat, split_tujuan};
    use crate::test_support;
    use actix_web::test;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeSet;

    #[actix_web::test]
    async fn tujuan_kembali_utuh() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;
        let surat_id = env.tambah_surat("421/10", "Rapat").await;

        let req = test::TestRequest::post()
            .uri("/api/disposisi")
            .set_json(json!({
                "surat_id": surat_id,
                "tujuan": ["Sekretaris", "Kasubag Umum"],
                "isi": "Mohon dihadiri",
                "sifat": "Penting",
                "batas_waktu": "2024-07-01",
                "catatan": "bawa laporan"
            }))
            .to_request();
        let dibuat: Dibuat = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/disposisi/{}", surat_id))
            .to_request();
        let list: Vec<Disposisi> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.len(), 1);

        let d = &list[0];
        assert_eq!(d.id, dibuat.id);
        assert_eq!(d.sifat, Sifat::Penting);
        assert_eq!(d.no_surat.as_deref(), Some("421/10"));
        assert_eq!(d.perihal.as_deref(), Some("Rapat"));

        let diminta: BTreeSet<Penerima> = [Penerima::Sekretaris, Penerima::KasubagUmum].into();
        let didapat: BTreeSet<Penerima> = d.tujuan.iter().collect();
        assert_eq!(didapat, diminta);
    }

    #[actix_web::test]
    async fn form_urlencoded_dengan_tujuan_teks() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;
        let surat_id = env.tambah_surat("421/11", "Edaran").await;

        let req = test::TestRequest::post()
            .uri("/api/disposisi")
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .set_payload(format!(
                "surat_id={}&tujuan=Kepala+Dinas%2C+Pengawas+Sekolah&isi=Edarkan&sifat=Segera",
                surat_id
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/api/disposisi").to_request();
        let list: Vec<Disposisi> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].tujuan.labels(), vec!["Kepala Dinas", "Pengawas Sekolah"]);
        assert_eq!(list[0].sifat, Sifat::Segera);
    }

    #[actix_web::test]
    async fn baris_lama_teks_koma_tetap_terbaca() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;
        let surat_id = env.tambah_surat("421/12", "Lama").await;

        sqlx::query(
            "INSERT INTO disposisi (surat_id, tujuan, isi, sifat) VALUES (?, 'Sekretaris, Kasubag Umum', 'lama', NULL)",
        )
        .bind(surat_id)
        .execute(&env.pool)
        .await
        .unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/disposisi/{}", surat_id))
            .to_request();
        let list: Vec<Disposisi> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            list[0].tujuan.labels(),
            split_tujuan("Sekretaris, Kasubag Umum")
        );
        assert_eq!(list[0].sifat, Sifat::Biasa);
    }

    #[actix_web::test]
    async fn update_dan_hapus_disposisi() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;
        let surat_id = env.tambah_surat("421/13", "Koordinasi").await;

        let req = test::TestRequest::post()
            .uri("/api/disposisi")
            .set_json(json!({ "surat_id": surat_id, "tujuan": ["Sekretaris"], "isi": "awal" }))
            .to_request();
        let dibuat: Dibuat = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/disposisi/{}", dibuat.id))
            .set_json(json!({
                "surat_id": surat_id,
                "tujuan": ["Kabid Sarpras"],
                "isi": "revisi",
                "sifat": "Segera"
            }))
            .to_request();
        let ok: Berhasil = test::call_and_read_body_json(&app, req).await;
        assert!(ok.success);

        let req = test::TestRequest::get().uri("/api/disposisi").to_request();
        let list: Vec<Disposisi> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list[0].isi.as_deref(), Some("revisi"));
        assert_eq!(list[0].tujuan.labels(), vec!["Kabid Sarpras"]);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/disposisi/{}", dibuat.id))
            .to_request();
        let ok: Berhasil = test::call_and_read_body_json(&app, req).await;
        assert!(ok.success);
        assert_eq!(env.jumlah("disposisi").await, 0);
        assert_eq!(env.jumlah("surat_masuk").await, 1);
    }

    #[actix_web::test]
    async fn surat_tidak_ada_500() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/disposisi")
            .set_json(json!({ "surat_id": 999, "tujuan": ["Sekretaris"], "isi": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("DB Error:"));
    }

    #[actix_web::test]
    async fn input_tidak_valid_400() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;
        let surat_id = env.tambah_surat("421/14", "x").await;

        let kasus = [
            json!({ "surat_id": surat_id, "tujuan": [], "isi": "x" }),
            json!({ "surat_id": surat_id, "tujuan": ["Satpam"], "isi": "x" }),
            json!({ "surat_id": surat_id, "tujuan": ["Sekretaris"], "isi": "x", "sifat": "Darurat" }),
            json!({ "tujuan": ["Sekretaris"], "isi": "x" }),
            json!({ "surat_id": "abc", "tujuan": ["Sekretaris"], "isi": "x" }),
        ];
        for body in kasus {
            let req = test::TestRequest::post()
                .uri("/api/disposisi")
                .set_json(&body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "body: {}", body);
        }
        assert_eq!(env.jumlah("disposisi").await, 0);
    }
}
