use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::config::AppConfig;

const SKEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS surat_masuk (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        no_agenda TEXT,
        no_surat TEXT,
        tgl_surat TEXT,
        tgl_diterima TEXT,
        asal_surat TEXT,
        perihal TEXT,
        keterangan TEXT,
        file_path TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS disposisi (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        surat_id INTEGER,
        tujuan TEXT,
        isi TEXT,
        sifat TEXT,
        batas_waktu TEXT,
        catatan TEXT,
        FOREIGN KEY (surat_id) REFERENCES surat_masuk(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS agenda (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nama_kegiatan TEXT,
        tanggal TEXT,
        waktu TEXT,
        lokasi TEXT,
        keterangan TEXT,
        pelaksana TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS agenda_kepala (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nama_kegiatan TEXT,
        tanggal TEXT,
        waktu TEXT,
        lokasi TEXT,
        keterangan TEXT
    )
    "#,
];

/// Kolom tambahan untuk database lama. Aman dijalankan berulang kali.
const MIGRASI_KOLOM: [(&str, &str, &str); 4] = [
    ("surat_masuk", "file_path", "TEXT"),
    ("surat_masuk", "keterangan", "TEXT"),
    ("disposisi", "catatan", "TEXT"),
    ("agenda", "pelaksana", "TEXT"),
];

pub async fn establish_connection(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    log::info!("Memakai database di: {}", config.database_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| {
            log::error!("Gagal membuat pool database: {:?}", e);
            e
        })?;

    Ok(pool)
}

/// Pool SQLite in-memory dengan satu koneksi yang tidak pernah ditutup,
/// supaya seluruh isi database bertahan selama pool hidup.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in SKEMA {
        sqlx::query(ddl).execute(pool).await?;
    }

    for (table, column, tipe) in MIGRASI_KOLOM {
        let alter = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, tipe);
        match sqlx::query(&alter).execute(pool).await {
            Ok(_) => log::info!("Kolom {}.{} ditambahkan", table, column),
            Err(sqlx::Error::Database(e)) if e.message().contains("duplicate column name") => {
                log::debug!("Kolom {}.{} sudah ada", table, column);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

pub async fn integrity_check(pool: &SqlitePool) -> Result<String, sqlx::Error> {
    sqlx::query_scalar::<_, String>("PRAGMA integrity_check")
        .fetch_one(pool)
        .await
}
