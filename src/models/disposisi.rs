// src/models/disposisi.rs
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::{id_fleksibel, teks_fleksibel, wajib};
use crate::error::AppError;

/// Jabatan yang bisa menerima disposisi. Urutan varian = urutan tampil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Penerima {
    KepalaDinas,
    Sekretaris,
    KabidKurikulum,
    KabidKetenagaan,
    KabidSarpras,
    KasubagUmum,
    KasubagKeuangan,
    PengawasSekolah,
}

impl Penerima {
    pub const SEMUA: [Penerima; 8] = [
        Penerima::KepalaDinas,
        Penerima::Sekretaris,
        Penerima::KabidKurikulum,
        Penerima::KabidKetenagaan,
        Penerima::KabidSarpras,
        Penerima::KasubagUmum,
        Penerima::KasubagKeuangan,
        Penerima::PengawasSekolah,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Penerima::KepalaDinas => "Kepala Dinas",
            Penerima::Sekretaris => "Sekretaris",
            Penerima::KabidKurikulum => "Kabid Kurikulum",
            Penerima::KabidKetenagaan => "Kabid Ketenagaan",
            Penerima::KabidSarpras => "Kabid Sarpras",
            Penerima::KasubagUmum => "Kasubag Umum",
            Penerima::KasubagKeuangan => "Kasubag Keuangan",
            Penerima::PengawasSekolah => "Pengawas Sekolah",
        }
    }
}

impl fmt::Display for Penerima {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Penerima {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Penerima::SEMUA
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("tujuan '{}' tidak dikenal", s))
    }
}

/// Himpunan tujuan disposisi. Disimpan di kolom `tujuan` sebagai array JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaftarTujuan(BTreeSet<Penerima>);

impl DaftarTujuan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, p: Penerima) -> bool {
        self.0.contains(&p)
    }

    pub fn iter(&self) -> impl Iterator<Item = Penerima> + '_ {
        self.0.iter().copied()
    }

    /// Return `true` kalau penerima jadi terpilih.
    pub fn toggle(&mut self, p: Penerima) -> bool {
        if self.0.remove(&p) {
            false
        } else {
            self.0.insert(p);
            true
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(Penerima::label).collect()
    }

    /// Parse ketat dari label, dipakai untuk input.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for label in labels {
            let label = label.as_ref();
            if label.trim().is_empty() {
                continue;
            }
            set.insert(label.parse::<Penerima>()?);
        }
        Ok(Self(set))
    }

    pub fn to_stored(&self) -> String {
        serde_json::Value::from(self.labels()).to_string()
    }

    /// Baca isi kolom. Baris lama berisi teks dipisah koma; label yang tidak
    /// dikenal dibuang.
    pub fn from_stored(raw: &str) -> Self {
        let raw = raw.trim();
        let labels: Vec<String> = if raw.starts_with('[') {
            match serde_json::from_str(raw) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("Kolom tujuan rusak ({}): {}", e, raw);
                    Vec::new()
                }
            }
        } else {
            raw.split(',').map(|s| s.trim().to_string()).collect()
        };

        let mut set = BTreeSet::new();
        for label in labels.iter().filter(|l| !l.is_empty()) {
            match label.parse::<Penerima>() {
                Ok(p) => {
                    set.insert(p);
                }
                Err(e) => log::warn!("Tujuan tersimpan diabaikan: {}", e),
            }
        }
        Self(set)
    }
}

impl FromIterator<Penerima> for DaftarTujuan {
    fn from_iter<T: IntoIterator<Item = Penerima>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<String> for DaftarTujuan {
    fn from(raw: String) -> Self {
        Self::from_stored(&raw)
    }
}

impl Serialize for DaftarTujuan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for p in &self.0 {
            seq.serialize_element(p.label())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for DaftarTujuan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Array label, atau teks dipisah koma dari klien lama / form
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Bentuk {
            Daftar(Vec<String>),
            Teks(String),
        }

        match Bentuk::deserialize(deserializer)? {
            Bentuk::Daftar(labels) => DaftarTujuan::from_labels(labels),
            Bentuk::Teks(teks) => DaftarTujuan::from_labels(teks.split(',')),
        }
        .map_err(de::Error::custom)
    }
}

/// Gabung label dengan ", " seperti form lama. Lossy kalau label mengandung koma.
pub fn join_tujuan<I, S>(labels: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn split_tujuan(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sifat {
    #[default]
    Biasa,
    Segera,
    Penting,
}

impl Sifat {
    pub fn label(&self) -> &'static str {
        match self {
            Sifat::Biasa => "Biasa",
            Sifat::Segera => "Segera",
            Sifat::Penting => "Penting",
        }
    }
}

impl fmt::Display for Sifat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sifat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "biasa" => Ok(Sifat::Biasa),
            "segera" => Ok(Sifat::Segera),
            "penting" => Ok(Sifat::Penting),
            _ => Err(format!(
                "sifat '{}' tidak dikenal (Biasa, Segera, Penting)",
                s.trim()
            )),
        }
    }
}

impl From<String> for Sifat {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or_else(|e| {
            log::warn!("Sifat tersimpan diabaikan: {}", e);
            Sifat::Biasa
        })
    }
}

impl Serialize for Sifat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Sifat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.unwrap_or_default().parse().map_err(de::Error::custom)
    }
}

/// Disposisi beserta `no_surat` dan `perihal` dari surat induknya.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Disposisi {
    pub id: i64,
    pub surat_id: i64,
    #[sqlx(try_from = "String")]
    pub tujuan: DaftarTujuan,
    pub isi: Option<String>,
    #[sqlx(try_from = "String")]
    pub sifat: Sifat,
    pub batas_waktu: Option<String>,
    pub catatan: Option<String>,
    pub no_surat: Option<String>,
    pub perihal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisposisiInput {
    #[serde(default, deserialize_with = "id_fleksibel")]
    pub surat_id: i64,
    #[serde(default)]
    pub tujuan: DaftarTujuan,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub isi: String,
    #[serde(default)]
    pub sifat: Sifat,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub batas_waktu: String,
    #[serde(default, deserialize_with = "teks_fleksibel")]
    pub catatan: String,
}

impl DisposisiInput {
    pub fn validasi(&self) -> Result<(), AppError> {
        if self.surat_id <= 0 {
            return Err(AppError::validasi("surat_id wajib diisi"));
        }
        if self.tujuan.is_empty() {
            return Err(AppError::validasi("Pilih minimal satu tujuan disposisi"));
        }
        wajib("isi", &self.isi)?;
        Ok(())
    }
}

impl From<&Disposisi> for DisposisiInput {
    fn from(d: &Disposisi) -> Self {
        Self {
            surat_id: d.surat_id,
            tujuan: d.tujuan.clone(),
            isi: d.isi.clone().unwrap_or_default(),
            sifat: d.sifat,
            batas_waktu: d.batas_waktu.clone().unwrap_or_default(),
            catatan: d.catatan.clone().unwrap_or_default(),
        }
    }
}
