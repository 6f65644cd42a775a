// src/models/mod.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub mod agenda;
pub mod dashboard;
pub mod disposisi;
pub mod surat_masuk;

/// Respon `POST`: id baris baru.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dibuat {
    pub id: i64,
}

/// Respon `PUT` dan `DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Berhasil {
    pub success: bool,
}

impl Berhasil {
    pub const OK: Berhasil = Berhasil { success: true };
}

/// Field teks dari JSON, form, atau multipart. Angka dan bool diterima sebagai
/// teks, null jadi string kosong.
pub(crate) fn teks_fleksibel<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "harus berupa teks, bukan {}",
            other
        ))),
    }
}

/// ID dari angka JSON atau string angka (form/multipart). Kosong jadi 0.
pub(crate) fn id_fleksibel<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom("harus bilangan bulat")),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("'{}' bukan bilangan bulat", s))),
        other => Err(serde::de::Error::custom(format!(
            "harus bilangan bulat, bukan {}",
            other
        ))),
    }
}

pub(crate) fn wajib(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validasi(format!("{} wajib diisi", field)));
    }
    Ok(())
}
