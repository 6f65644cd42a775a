// src/client/api.rs
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::agenda::{Agenda, AgendaInput, AgendaKepala, AgendaKepalaInput};
use crate::models::dashboard::{HealthStatus, Statistik};
use crate::models::disposisi::{Disposisi, DisposisiInput};
use crate::models::surat_masuk::{SuratMasuk, SuratMasukInput};
use crate::models::{Berhasil, Dibuat};
use crate::payload::FIELD_FILE;
use crate::utils::Lampiran;

/// Pesan yang ditampilkan kalau server tidak mengirim field `error`.
pub const PESAN_GAGAL: &str = "Terjadi kesalahan pada server.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Gagal menghubungi server: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Data tidak valid: {0}")]
    Json(#[from] serde_json::Error),
    /// Ditolak sebelum request dikirim.
    #[error("{0}")]
    Validasi(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn kirim<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| PESAN_GAGAL.to_string());

        log::warn!("Request gagal ({}): {}", status, message);
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Field surat ikut lampiran: multipart untuk bytes, JSON `fileData`/`fileName` untuk data URI.
    fn dengan_lampiran<T: Serialize>(
        request: RequestBuilder,
        input: &T,
        lampiran: Option<&Lampiran>,
    ) -> Result<RequestBuilder, ClientError> {
        let mut fields = match serde_json::to_value(input)? {
            Value::Object(fields) => fields,
            _ => return Ok(request.json(input)),
        };

        match lampiran {
            None => Ok(request.json(&fields)),
            Some(Lampiran::DataUri { nama, data }) => {
                fields.insert("fileData".into(), Value::String(data.clone()));
                fields.insert("fileName".into(), Value::String(nama.clone()));
                Ok(request.json(&fields))
            }
            Some(Lampiran::Bytes { nama, bytes }) => {
                let mut form = Form::new();
                for (key, value) in fields {
                    let text = match value {
                        Value::String(s) => s,
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    form = form.text(key, text);
                }
                let part = Part::bytes(bytes.clone()).file_name(nama.clone());
                Ok(request.multipart(form.part(FIELD_FILE, part)))
            }
        }
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        Self::kirim(self.http.get(self.url("/api/health"))).await
    }

    pub async fn stats(&self) -> Result<Statistik, ClientError> {
        Self::kirim(self.http.get(self.url("/api/stats"))).await
    }

    // surat masuk

    pub async fn list_surat(&self) -> Result<Vec<SuratMasuk>, ClientError> {
        Self::kirim(self.http.get(self.url("/api/surat-masuk"))).await
    }

    pub async fn search_surat(&self, q: &str) -> Result<Vec<SuratMasuk>, ClientError> {
        Self::kirim(self.http.get(self.url("/api/search-surat")).query(&[("q", q)])).await
    }

    pub async fn create_surat(
        &self,
        input: &SuratMasukInput,
        lampiran: Option<&Lampiran>,
    ) -> Result<Dibuat, ClientError> {
        let request = self.http.post(self.url("/api/surat-masuk"));
        Self::kirim(Self::dengan_lampiran(request, input, lampiran)?).await
    }

    pub async fn update_surat(
        &self,
        id: i64,
        input: &SuratMasukInput,
        lampiran: Option<&Lampiran>,
    ) -> Result<Berhasil, ClientError> {
        let request = self.http.put(self.url(&format!("/api/surat-masuk/{}", id)));
        Self::kirim(Self::dengan_lampiran(request, input, lampiran)?).await
    }

    pub async fn delete_surat(&self, id: i64) -> Result<Berhasil, ClientError> {
        Self::kirim(self.http.delete(self.url(&format!("/api/surat-masuk/{}", id)))).await
    }

    // disposisi

    pub async fn list_disposisi(&self) -> Result<Vec<Disposisi>, ClientError> {
        Self::kirim(self.http.get(self.url("/api/disposisi"))).await
    }

    pub async fn disposisi_surat(&self, surat_id: i64) -> Result<Vec<Disposisi>, ClientError> {
        Self::kirim(self.http.get(self.url(&format!("/api/disposisi/{}", surat_id)))).await
    }

    pub async fn create_disposisi(&self, input: &DisposisiInput) -> Result<Dibuat, ClientError> {
        Self::kirim(self.http.post(self.url("/api/disposisi")).json(input)).await
    }

    pub async fn update_disposisi(
        &self,
        id: i64,
        input: &DisposisiInput,
    ) -> Result<Berhasil, ClientError> {
        Self::kirim(
            self.http
                .put(self.url(&format!("/api/disposisi/{}", id)))
                .json(input),
        )
        .await
    }

    pub async fn delete_disposisi(&self, id: i64) -> Result<Berhasil, ClientError> {
        Self::kirim(self.http.delete(self.url(&format!("/api/disposisi/{}", id)))).await
    }

    // agenda

    pub async fn list_agenda(&self) -> Result<Vec<Agenda>, ClientError> {
        Self::kirim(self.http.get(self.url("/api/agenda"))).await
    }

    pub async fn create_agenda(&self, input: &AgendaInput) -> Result<Dibuat, ClientError> {
        Self::kirim(self.http.post(self.url("/api/agenda")).json(input)).await
    }

    pub async fn update_agenda(&self, id: i64, input: &AgendaInput) -> Result<Berhasil, ClientError> {
        Self::kirim(
            self.http
                .put(self.url(&format!("/api/agenda/{}", id)))
                .json(input),
        )
        .await
    }

    pub async fn delete_agenda(&self, id: i64) -> Result<Berhasil, ClientError> {
        Self::kirim(self.http.delete(self.url(&format!("/api/agenda/{}", id)))).await
    }

    // agenda kepala

    pub async fn list_agenda_kepala(&self) -> Result<Vec<AgendaKepala>, ClientError> {
        Self::kirim(self.http.get(self.url("/api/agenda-kepala"))).await
    }

    pub async fn create_agenda_kepala(
        &self,
        input: &AgendaKepalaInput,
    ) -> Result<Dibuat, ClientError> {
        Self::kirim(self.http.post(self.url("/api/agenda-kepala")).json(input)).await
    }

    pub async fn update_agenda_kepala(
        &self,
        id: i64,
        input: &AgendaKepalaInput,
    ) -> Result<Berhasil, ClientError> {
        Self::kirim(
            self.http
                .put(self.url(&format!("/api/agenda-kepala/{}", id)))
                .json(input),
        )
        .await
    }

    pub async fn delete_agenda_kepala(&self, id: i64) -> Result<Berhasil, ClientError> {
        Self::kirim(self.http.delete(self.url(&format!("/api/agenda-kepala/{}", id)))).await
    }
}
