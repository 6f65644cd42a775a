// src/client/views.rs
//! State halaman untuk frontend: daftar data, isi form, dan id yang sedang diedit.
//! Setiap perubahan selalu diikuti fetch ulang dari server.

use super::api::{ApiClient, ClientError};
use crate::error::AppError;
use crate::models::agenda::{Agenda, AgendaInput, AgendaKepala, AgendaKepalaInput};
use crate::models::dashboard::Statistik;
use crate::models::disposisi::{Disposisi, DisposisiInput, Penerima};
use crate::models::surat_masuk::{SuratMasuk, SuratMasukInput};
use crate::utils::Lampiran;

fn cek(hasil: Result<(), AppError>) -> Result<(), ClientError> {
    hasil.map_err(|e| ClientError::Validasi(e.to_string()))
}

#[derive(Debug, Default)]
pub struct SuratMasukView {
    pub items: Vec<SuratMasuk>,
    pub form: SuratMasukInput,
    pub lampiran: Option<Lampiran>,
    pub editing: Option<i64>,
}

impl SuratMasukView {
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.items = api.list_surat().await?;
        Ok(())
    }

    pub fn edit(&mut self, surat: &SuratMasuk) {
        self.form = SuratMasukInput::from(surat);
        self.lampiran = None;
        self.editing = Some(surat.id);
    }

    pub fn reset(&mut self) {
        self.form = SuratMasukInput::default();
        self.lampiran = None;
        self.editing = None;
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        cek(self.form.validasi())?;

        match self.editing {
            Some(id) => {
                api.update_surat(id, &self.form, self.lampiran.as_ref())
                    .await?;
            }
            None => {
                api.create_surat(&self.form, self.lampiran.as_ref()).await?;
            }
        }

        self.reset();
        self.refresh(api).await
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), ClientError> {
        api.delete_surat(id).await?;
        self.refresh(api).await
    }
}

/// Halaman disposisi. `surat` dipakai untuk pilihan surat induk di form.
#[derive(Debug, Default)]
pub struct DisposisiView {
    pub items: Vec<Disposisi>,
    pub surat: Vec<SuratMasuk>,
    pub form: DisposisiInput,
    pub editing: Option<i64>,
}

impl DisposisiView {
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.items = api.list_disposisi().await?;
        self.surat = api.list_surat().await?;
        Ok(())
    }

    /// Centang atau hapus centang satu tujuan. `true` kalau sekarang terpilih.
    pub fn toggle(&mut self, label: &str) -> Result<bool, ClientError> {
        let penerima: Penerima = label.parse().map_err(ClientError::Validasi)?;
        Ok(self.form.tujuan.toggle(penerima))
    }

    pub fn edit(&mut self, disposisi: &Disposisi) {
        self.form = DisposisiInput::from(disposisi);
        self.editing = Some(disposisi.id);
    }

    pub fn reset(&mut self) {
        self.form = DisposisiInput::default();
        self.editing = None;
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        cek(self.form.validasi())?;

        match self.editing {
            Some(id) => {
                api.update_disposisi(id, &self.form).await?;
            }
            None => {
                api.create_disposisi(&self.form).await?;
            }
        }

        self.reset();
        self.refresh(api).await
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), ClientError> {
        api.delete_disposisi(id).await?;
        self.refresh(api).await
    }
}

#[derive(Debug, Default)]
pub struct AgendaView {
    pub items: Vec<Agenda>,
    pub form: AgendaInput,
    pub editing: Option<i64>,
}

impl AgendaView {
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.items = api.list_agenda().await?;
        Ok(())
    }

    pub fn edit(&mut self, agenda: &Agenda) {
        self.form = AgendaInput::from(agenda);
        self.editing = Some(agenda.id);
    }

    pub fn reset(&mut self) {
        self.form = AgendaInput::default();
        self.editing = None;
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        cek(self.form.validasi())?;

        match self.editing {
            Some(id) => {
                api.update_agenda(id, &self.form).await?;
            }
            None => {
                api.create_agenda(&self.form).await?;
            }
        }

        self.reset();
        self.refresh(api).await
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), ClientError> {
        api.delete_agenda(id).await?;
        self.refresh(api).await
    }
}

#[derive(Debug, Default)]
pub struct AgendaKepalaView {
    pub items: Vec<AgendaKepala>,
    pub form: AgendaKepalaInput,
    pub editing: Option<i64>,
}

impl AgendaKepalaView {
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.items = api.list_agenda_kepala().await?;
        Ok(())
    }

    pub fn edit(&mut self, agenda: &AgendaKepala) {
        self.form = AgendaKepalaInput::from(agenda);
        self.editing = Some(agenda.id);
    }

    pub fn reset(&mut self) {
        self.form = AgendaKepalaInput::default();
        self.editing = None;
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        cek(self.form.validasi())?;

        match self.editing {
            Some(id) => {
                api.update_agenda_kepala(id, &self.form).await?;
            }
            None => {
                api.create_agenda_kepala(&self.form).await?;
            }
        }

        self.reset();
        self.refresh(api).await
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), ClientError> {
        api.delete_agenda_kepala(id).await?;
        self.refresh(api).await
    }
}

#[derive(Debug, Default)]
pub struct PencarianView {
    pub query: String,
    pub hasil: Vec<SuratMasuk>,
    pub terpilih: Option<SuratMasuk>,
    pub disposisi: Vec<Disposisi>,
}

impl PencarianView {
    /// Query kosong tidak mengirim request; return `false` untuk kasus itu.
    pub async fn cari(&mut self, api: &ApiClient) -> Result<bool, ClientError> {
        if self.query.trim().is_empty() {
            return Ok(false);
        }

        self.hasil = api.search_surat(&self.query).await?;
        self.terpilih = None;
        self.disposisi.clear();
        Ok(true)
    }

    pub async fn pilih(&mut self, api: &ApiClient, surat: &SuratMasuk) -> Result<(), ClientError> {
        self.terpilih = Some(surat.clone());
        self.disposisi = api.disposisi_surat(surat.id).await?;
        Ok(())
    }

    pub async fn hapus_surat(&mut self, api: &ApiClient, id: i64) -> Result<(), ClientError> {
        api.delete_surat(id).await?;
        self.hasil.retain(|s| s.id != id);
        self.terpilih = None;
        self.disposisi.clear();
        Ok(())
    }

    pub async fn hapus_disposisi(&mut self, api: &ApiClient, id: i64) -> Result<(), ClientError> {
        api.delete_disposisi(id).await?;
        self.disposisi.retain(|d| d.id != id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub stats: Statistik,
}

impl DashboardView {
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.stats = api.stats().await?;
        Ok(())
    }
}
