// src/client/mod.rs
//! Lapisan data untuk frontend: klien HTTP ke API dan state tiap halaman.

pub mod api;
pub mod views;

pub use api::{ApiClient, ClientError, PESAN_GAGAL};
pub use views::{
    AgendaKepalaView, AgendaView, DashboardView, DisposisiView, PencarianView, SuratMasukView,
};
