// src/controllers/mod.rs
use actix_web::web;

pub mod agenda_controller;
pub mod agenda_kepala_controller;
pub mod dashboard_controller;
pub mod disposisi_controller;
pub mod surat_masuk_controller;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        //dashboard
        .service(dashboard_controller::health)
        .service(dashboard_controller::debug_info)
        .service(dashboard_controller::get_stats)
        //surat masuk
        .service(surat_masuk_controller::get_surat_masuk)
        .service(surat_masuk_controller::search_surat)
        .service(surat_masuk_controller::create_surat_masuk)
        .service(surat_masuk_controller::update_surat_masuk)
        .service(surat_masuk_controller::delete_surat_masuk)
        //disposisi
        .service(disposisi_controller::get_disposisi)
        .service(disposisi_controller::get_disposisi_by_surat)
        .service(disposisi_controller::create_disposisi)
        .service(disposisi_controller::update_disposisi)
        .service(disposisi_controller::delete_disposisi)
        //agenda
        .service(agenda_controller::get_agenda)
        .service(agenda_controller::create_agenda)
        .service(agenda_controller::update_agenda)
        .service(agenda_controller::delete_agenda)
        //agenda kepala
        .service(agenda_kepala_controller::get_agenda_kepala)
        .service(agenda_kepala_controller::create_agenda_kepala)
        .service(agenda_kepala_controller::update_agenda_kepala)
        .service(agenda_kepala_controller::delete_agenda_kepala);
}
