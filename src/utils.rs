//utils.rs
use actix_multipart::Field;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use futures::TryStreamExt;
use rand::Rng;
use sanitize_filename::sanitize;
use std::path::Path;

use crate::error::AppError;

/// Prefix URL publik untuk file di direktori upload.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

// Padding boleh ada boleh tidak, seperti data URI dari browser
const LAMPIRAN_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Pastikan folder upload tersedia dan bisa ditulis
pub fn ensure_upload_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let berkas_cek = dir.join(".write-check");
    std::fs::write(&berkas_cek, b"ok")?;
    std::fs::remove_file(berkas_cek)
}

/// `<unix-millis>-<acak>-<nama asli yang sudah disanitasi>`
pub fn generate_upload_name(original: &str) -> String {
    let suffix = rand::rng().random_range(0..1_000_000_000u32);
    let mut safe = sanitize(original.trim()).replace(' ', "_");
    if safe.is_empty() {
        safe = "lampiran".to_string();
    }
    format!(
        "{}-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        suffix,
        safe
    )
}

pub fn public_path(saved_name: &str) -> String {
    format!("{}/{}", UPLOAD_URL_PREFIX, saved_name)
}

/// Buang header `data:<mime>;base64,` kalau ada
pub fn strip_data_uri(data: &str) -> &str {
    let data = data.trim();
    if data.starts_with("data:") {
        if let Some(idx) = data.find(";base64,") {
            return &data[idx + ";base64,".len()..];
        }
    }
    data
}

pub fn decode_data_uri(data: &str) -> Result<Vec<u8>, AppError> {
    let cleaned: String = strip_data_uri(data)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(LAMPIRAN_BASE64.decode(cleaned)?)
}

/// Tulis bytes apa adanya ke direktori upload, return path publik.
pub async fn save_upload_bytes(
    dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    if !dir.exists() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let saved_name = generate_upload_name(original_name);
    tokio::fs::write(dir.join(&saved_name), bytes)
        .await
        .map_err(|e| {
            log::error!("Gagal menulis lampiran {}: {}", saved_name, e);
            e
        })?;
    log::info!("Lampiran disimpan: {} ({} bytes)", saved_name, bytes.len());
    Ok(public_path(&saved_name))
}

/// Lampiran yang ikut di payload, belum ditulis ke disk.
#[derive(Debug, Clone, PartialEq)]
pub enum Lampiran {
    /// Bagian multipart `file`.
    Bytes { nama: String, bytes: Vec<u8> },
    /// Pasangan `fileData` (base64 / data URI) dan `fileName`.
    DataUri { nama: String, data: String },
}

impl Lampiran {
    pub fn nama(&self) -> &str {
        match self {
            Lampiran::Bytes { nama, .. } | Lampiran::DataUri { nama, .. } => nama,
        }
    }

    /// Decode kalau perlu lalu simpan, return path publik `/uploads/<nama>`.
    pub async fn simpan(&self, dir: &Path) -> Result<String, AppError> {
        match self {
            Lampiran::Bytes { nama, bytes } => save_upload_bytes(dir, nama, bytes).await,
            Lampiran::DataUri { nama, data } => {
                let bytes = decode_data_uri(data).map_err(|e| {
                    log::error!("Gagal decode lampiran {}: {}", nama, e);
                    e
                })?;
                save_upload_bytes(dir, nama, &bytes).await
            }
        }
    }
}

/// Baca isi field multipart `file` ke memori. `None` kalau field dikirim
/// tanpa nama file (input file kosong dari form browser).
pub async fn read_upload_field(
    mut field: Field,
    batas: usize,
) -> Result<Option<Lampiran>, AppError> {
    let nama = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(AppError::payload)? {
        if bytes.len() + chunk.len() > batas {
            return Err(AppError::payload("ukuran lampiran melebihi batas request"));
        }
        bytes.extend_from_slice(&chunk);
    }

    if nama.is_empty() {
        return Ok(None);
    }
    Ok(Some(Lampiran::Bytes { nama, bytes }))
}
