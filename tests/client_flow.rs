// tests/client_flow.rs
use std::net::TcpListener;

use disposisi_backend::client::{ApiClient, ClientError, DisposisiView, PencarianView, SuratMasukView};
use disposisi_backend::config::AppConfig;
use disposisi_backend::db;
use disposisi_backend::models::disposisi::Sifat;
use disposisi_backend::models::surat_masuk::SuratMasukInput;
use disposisi_backend::utils::Lampiran;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Server {
    api: ApiClient,
    base_url: String,
    upload: TempDir,
    handle: actix_web::dev::ServerHandle,
}

async fn jalankan_server() -> Server {
    let pool = db::connect_in_memory().await.unwrap();
    db::migrate(&pool).await.unwrap();

    let upload = tempfile::tempdir().unwrap();
    let config = AppConfig {
        upload_dir: upload.path().to_path_buf(),
        app_env: "test".to_string(),
        ..AppConfig::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let server = disposisi_backend::run(listener, pool, config).unwrap();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Server {
        api: ApiClient::new(base_url.clone()),
        base_url,
        upload,
        handle,
    }
}

fn surat_baru(no_surat: &str, perihal: &str) -> SuratMasukInput {
    SuratMasukInput {
        no_agenda: "12".into(),
        no_surat: no_surat.into(),
        tgl_surat: "2024-05-01".into(),
        tgl_diterima: "2024-05-03".into(),
        asal_surat: "Dinas Pendidikan".into(),
        perihal: perihal.into(),
        keterangan: String::new(),
    }
}

#[actix_web::test]
async fn alur_surat_sampai_disposisi() {
    let server = jalankan_server().await;
    let api = &server.api;

    let health = api.health().await.unwrap();
    assert_eq!(health.database, "connected");

    let mut surat_view = SuratMasukView::default();
    surat_view.form = surat_baru("800/15", "Undangan rapat koordinasi");
    surat_view.submit(api).await.unwrap();

    assert_eq!(surat_view.editing, None);
    assert_eq!(surat_view.items.len(), 1);
    let surat = surat_view.items[0].clone();
    assert_eq!(surat.no_surat.as_deref(), Some("800/15"));

    let mut disposisi_view = DisposisiView::default();
    disposisi_view.form.surat_id = surat.id;
    disposisi_view.form.isi = "Hadiri dan laporkan".into();
    disposisi_view.form.sifat = Sifat::Segera;
    disposisi_view.toggle("Sekretaris").unwrap();
    disposisi_view.toggle("Kasubag Umum").unwrap();
    disposisi_view.submit(api).await.unwrap();

    assert_eq!(disposisi_view.items.len(), 1);
    assert_eq!(disposisi_view.surat.len(), 1);
    assert!(disposisi_view.form.tujuan.is_empty());

    let milik_surat = api.disposisi_surat(surat.id).await.unwrap();
    assert_eq!(milik_surat, disposisi_view.items);
    assert_eq!(
        milik_surat[0].tujuan.labels(),
        vec!["Sekretaris", "Kasubag Umum"]
    );

    let stats = api.stats().await.unwrap();
    assert_eq!((stats.surat_count, stats.disposisi_count), (1, 1));

    surat_view.delete(api, surat.id).await.unwrap();
    assert!(surat_view.items.is_empty());
    assert!(api.disposisi_surat(surat.id).await.unwrap().is_empty());

    server.handle.stop(true).await;
}

#[actix_web::test]
async fn surat_terbaru_tampil_pertama_dan_lampiran_bisa_diunduh() {
    let server = jalankan_server().await;
    let api = &server.api;

    api.create_surat(&surat_baru("001/A", "Pertama"), None)
        .await
        .unwrap();

    let lampiran = Lampiran::Bytes {
        nama: "scan surat.pdf".into(),
        bytes: b"%PDF-1.7 contoh".to_vec(),
    };
    let dibuat = api
        .create_surat(&surat_baru("002/B", "Kedua"), Some(&lampiran))
        .await
        .unwrap();

    let list = api.list_surat().await.unwrap();
    assert_eq!(list[0].id, dibuat.id);

    let path = list[0].file_path.clone().unwrap();
    assert!(path.starts_with("/uploads/"));
    assert!(path.ends_with("-scan_surat.pdf"));

    let isi = reqwest::get(format!("{}{}", server.base_url, path))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(&isi[..], b"%PDF-1.7 contoh");
    assert_eq!(std::fs::read_dir(server.upload.path()).unwrap().count(), 1);

    let data_uri = Lampiran::DataUri {
        nama: "memo.txt".into(),
        data: "data:text/plain;base64,bWVtbw==".into(),
    };
    api.update_surat(dibuat.id, &surat_baru("002/B", "Kedua"), Some(&data_uri))
        .await
        .unwrap();
    let list = api.list_surat().await.unwrap();
    assert!(list[0].file_path.as_deref().unwrap().ends_with("-memo.txt"));
    assert_eq!(std::fs::read_dir(server.upload.path()).unwrap().count(), 2);

    server.handle.stop(true).await;
}

#[actix_web::test]
async fn pencarian_dan_error_server() {
    let server = jalankan_server().await;
    let api = &server.api;

    api.create_surat(&surat_baru("100/X", "Pengadaan buku"), None)
        .await
        .unwrap();
    api.create_surat(&surat_baru("200/Y", "Laporan 50% selesai"), None)
        .await
        .unwrap();

    let mut cari = PencarianView {
        query: "50%".into(),
        ..Default::default()
    };
    assert!(cari.cari(api).await.unwrap());
    assert_eq!(cari.hasil.len(), 1);
    assert_eq!(cari.hasil[0].no_surat.as_deref(), Some("200/Y"));

    let surat = cari.hasil[0].clone();
    cari.pilih(api, &surat).await.unwrap();
    assert!(cari.disposisi.is_empty());

    cari.hapus_surat(api, surat.id).await.unwrap();
    assert!(cari.hasil.is_empty());
    assert_eq!(api.list_surat().await.unwrap().len(), 1);

    let mut kosong = surat_baru("300/Z", "x");
    kosong.perihal.clear();
    let err = api.create_surat(&kosong, None).await.unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "perihal wajib diisi");
        }
        other => panic!("error tak terduga: {:?}", other),
    }

    server.handle.stop(true).await;
}
