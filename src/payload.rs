// src/payload.rs
use actix_multipart::Multipart;
use actix_web::{HttpMessage, HttpRequest, web};
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::utils::{Lampiran, read_upload_field};

/// Nama field multipart untuk lampiran surat.
pub const FIELD_FILE: &str = "file";

/// Body request yang sudah dibaca: field teks plus lampiran opsional.
/// Dipakai bersama oleh JSON, form urlencoded, dan multipart.
#[derive(Debug, Default)]
pub struct Masukan {
    pub fields: Map<String, Value>,
    pub lampiran: Option<Lampiran>,
}

impl Masukan {
    /// Deserialize field ke skema endpoint. Gagal parse = 400.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| AppError::validasi(format!("Data tidak valid: {}", e)))
    }

    fn from_fields(mut fields: Map<String, Value>, lampiran: Option<Lampiran>) -> Self {
        let file_data = fields.remove("fileData");
        let file_name = fields.remove("fileName");

        // fileData tanpa fileName (atau sebaliknya) diabaikan
        let data_uri = match (file_data, file_name) {
            (Some(Value::String(data)), Some(Value::String(nama)))
                if !data.is_empty() && !nama.is_empty() =>
            {
                Some(Lampiran::DataUri { nama, data })
            }
            _ => None,
        };

        Self {
            fields,
            lampiran: lampiran.or(data_uri),
        }
    }
}

pub async fn read_masukan(
    req: &HttpRequest,
    payload: web::Payload,
    batas: usize,
) -> Result<Masukan, AppError> {
    let content_type = req.content_type().to_ascii_lowercase();

    if content_type == "multipart/form-data" {
        return read_multipart(req, payload, batas).await;
    }

    let body = read_body(payload, batas).await?;

    if content_type == "application/x-www-form-urlencoded" {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_bytes(&body).map_err(AppError::payload)?;
        let mut fields = Map::new();
        for (k, v) in pairs {
            push_field(&mut fields, k, v);
        }
        return Ok(Masukan::from_fields(fields, None));
    }

    // Selain dua di atas dianggap JSON, termasuk tanpa content-type
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Masukan::default());
    }
    match serde_json::from_slice::<Value>(&body).map_err(AppError::payload)? {
        Value::Object(fields) => Ok(Masukan::from_fields(fields, None)),
        _ => Err(AppError::payload("body JSON harus berupa object")),
    }
}

async fn read_body(mut payload: web::Payload, batas: usize) -> Result<web::BytesMut, AppError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.try_next().await.map_err(AppError::payload)? {
        if body.len() + chunk.len() > batas {
            return Err(AppError::payload("ukuran body melebihi batas"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

async fn read_multipart(
    req: &HttpRequest,
    payload: web::Payload,
    batas: usize,
) -> Result<Masukan, AppError> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut fields = Map::new();
    let mut lampiran = None;
    let mut terpakai = 0usize;

    while let Some(mut field) = multipart.try_next().await.map_err(AppError::payload)? {
        let name = field.name().unwrap_or("").to_string();

        if name == FIELD_FILE {
            if let Some(file) = read_upload_field(field, batas.saturating_sub(terpakai)).await? {
                if let Lampiran::Bytes { bytes, .. } = &file {
                    terpakai += bytes.len();
                }
                lampiran = Some(file);
            }
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(AppError::payload)? {
            terpakai += chunk.len();
            if terpakai > batas {
                return Err(AppError::payload("ukuran body melebihi batas"));
            }
            data.extend_from_slice(&chunk);
        }
        let value = String::from_utf8(data)
            .map_err(|_| AppError::payload(format!("Invalid UTF-8 in {}", name)))?;
        push_field(&mut fields, name, value);
    }

    Ok(Masukan::from_fields(fields, lampiran))
}

/// Field yang muncul berulang (mis. `tujuan` dari checkbox) dikumpulkan jadi array.
fn push_field(fields: &mut Map<String, Value>, name: String, value: String) {
    let name = name.trim_end_matches("[]").to_string();
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
        None => {
            fields.insert(name, Value::String(value));
        }
    }
}
