// src/test_support.rs
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::db;
use crate::models::surat_masuk::SuratMasuk;

/// Database in-memory + direktori upload sementara untuk satu test.
pub struct Lingkungan {
    pub pool: SqlitePool,
    pub config: AppConfig,
    _upload: TempDir,
}

impl Lingkungan {
    pub async fn baru() -> Self {
        let pool = db::connect_in_memory().await.unwrap();
        db::migrate(&pool).await.unwrap();

        let upload = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            upload_dir: upload.path().to_path_buf(),
            app_env: "test".to_string(),
            ..AppConfig::default()
        };

        Self {
            pool,
            config,
            _upload: upload,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        crate::build_app(self.pool.clone(), self.config.clone())
    }

    pub async fn surat(&self, id: i64) -> SuratMasuk {
        sqlx::query_as::<_, SuratMasuk>(
            "SELECT id, no_agenda, no_surat, tgl_surat, tgl_diterima, asal_surat, perihal, \
             keterangan, file_path, created_at FROM surat_masuk WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    pub async fn tambah_surat(&self, no_surat: &str, perihal: &str) -> i64 {
        sqlx::query(
            "INSERT INTO surat_masuk (no_agenda, no_surat, tgl_surat, tgl_diterima, asal_surat, perihal, keterangan) \
             VALUES ('1', ?, '2024-01-01', '2024-01-02', 'Dinas', ?, '')",
        )
        .bind(no_surat)
        .bind(perihal)
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub async fn jumlah(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    /// Baca file dari path publik `/uploads/<nama>`.
    pub fn baca_upload(&self, path: &str) -> Vec<u8> {
        let nama = path.trim_start_matches("/uploads/");
        std::fs::read(self.config.upload_dir.join(nama)).unwrap()
    }
}

const BOUNDARY: &str = "----disposisi-test-boundary";

/// Penyusun body `multipart/form-data` sederhana untuk test.
#[derive(Default)]
pub struct Multipart {
    body: Vec<u8>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Pasang header dan body ke request test.
    pub fn apply(mut self, req: test::TestRequest) -> test::TestRequest {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        req.insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(self.body)
    }
}
