// src/models/surat_masuk.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{teks_fleksibel, wajib};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SuratMasuk {
    pub id: i64,
    pub no_agenda: Option<String>,
    pub no_surat: Option<String>,
    pub tgl_surat: Option<String>,
    pub tgl_diterima: Option<String>,
    pub asal_surat: Option<String>,
    pub perihal: Option<String>,
    pub keterangan: Option<String>,
    pub file_path: Option<String>,
    pub created_at: Option<String>,
}

/// Field yang dikirim saat membuat atau mengubah surat masuk.
/// Lampiran tidak termasuk di sini, dibaca terpisah dari payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuratMasukInput {
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub no_agenda: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub no_surat: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub tgl_surat: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub tgl_diterima: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub asal_surat: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub perihal: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub keterangan: String,
}

impl SuratMasukInput {
    pub fn validasi(&self) -> Result<(), AppError> {
        wajib("no_agenda", &self.no_agenda)?;
        wajib("no_surat", &self.no_surat)?;
        wajib("tgl_surat", &self.tgl_surat)?;
        wajib("tgl_diterima", &self.tgl_diterima)?;
        wajib("asal_surat", &self.asal_surat)?;
        wajib("perihal", &self.perihal)?;
        Ok(())
    }
}

impl From<&SuratMasuk> for SuratMasukInput {
    fn from(s: &SuratMasuk) -> Self {
        Self {
            no_agenda: s.no_agenda.clone().unwrap_or_default(),
            no_surat: s.no_surat.clone().unwrap_or_default(),
            tgl_surat: s.tgl_surat.clone().unwrap_or_default(),
            tgl_diterima: s.tgl_diterima.clone().unwrap_or_default(),
            asal_surat: s.asal_surat.clone().unwrap_or_default(),
            perihal: s.perihal.clone().unwrap_or_default(),
            keterangan: s.keterangan.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
