// src/models/agenda.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{teks_fleksibel, wajib};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Agenda {
    pub id: i64,
    pub nama_kegiatan: Option<String>,
    pub tanggal: Option<String>,
    pub waktu: Option<String>,
    pub lokasi: Option<String>,
    pub keterangan: Option<String>,
    pub pelaksana: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaInput {
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub nama_kegiatan: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub tanggal: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub waktu: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub lokasi: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub keterangan: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub pelaksana: String,
}

impl AgendaInput {
    pub fn validasi(&self) -> Result<(), AppError> {
        validasi_jadwal(&self.nama_kegiatan, &self.tanggal, &self.waktu, &self.lokasi)
    }
}

impl From<&Agenda> for AgendaInput {
    fn from(a: &Agenda) -> Self {
        Self {
            nama_kegiatan: a.nama_kegiatan.clone().unwrap_or_default(),
            tanggal: a.tanggal.clone().unwrap_or_default(),
            waktu: a.waktu.clone().unwrap_or_default(),
            lokasi: a.lokasi.clone().unwrap_or_default(),
            keterangan: a.keterangan.clone().unwrap_or_default(),
            pelaksana: a.pelaksana.clone().unwrap_or_default(),
        }
    }
}

/// Agenda Kepala Badan: field sama dengan agenda umum tanpa `pelaksana`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AgendaKepala {
    pub id: i64,
    pub nama_kegiatan: Option<String>,
    pub tanggal: Option<String>,
    pub waktu: Option<String>,
    pub lokasi: Option<String>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaKepalaInput {
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub nama_kegiatan: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub tanggal: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub waktu: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub lokasi: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub keterangan: String,
}

impl AgendaKepalaInput {
    pub fn validasi(&self) -> Result<(), AppError> {
        validasi_jadwal(&self.nama_kegiatan, &self.tanggal, &self.waktu, &self.lokasi)
    }
}

impl From<&AgendaKepala> for AgendaKepalaInput {
    fn from(a: &AgendaKepala) -> Self {
        Self {
            nama_kegiatan: a.nama_kegiatan.clone().unwrap_or_default(),
            tanggal: a.tanggal.clone().unwrap_or_default(),
            waktu: a.waktu.clone().unwrap_or_default(),
            lokasi: a.lokasi.clone().unwrap_or_default(),
            keterangan: a.keterangan.clone().unwrap_or_default(),
        }
    }
}

fn validasi_jadwal(nama: &str, tanggal: &str, waktu: &str, lokasi: &str) -> Result<(), AppError> {
    wajib("nama_kegiatan", nama)?;
    wajib("tanggal", tanggal)?;
    wajib("waktu", waktu)?;
    wajib("lokasi", lokasi)?;
    Ok(())
}
