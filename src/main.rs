// main.rs
use dotenv::dotenv;
use std::net::TcpListener;

use disposisi_backend::config::AppConfig;
use disposisi_backend::{db, utils};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting up...");

    let config = AppConfig::from_env();

    let pool = match db::establish_connection(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Gagal inisialisasi pool database: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::migrate(&pool).await {
        log::error!("Gagal migrasi skema database: {:?}", e);
        std::process::exit(1);
    }

    match db::integrity_check(&pool).await {
        Ok(hasil) if hasil == "ok" => log::info!("Integrity check database: ok"),
        Ok(hasil) => log::warn!("Integrity check database: {}", hasil),
        Err(e) => log::warn!("Integrity check database gagal: {}", e),
    }

    match utils::ensure_upload_dir(&config.upload_dir) {
        Ok(()) => log::info!(
            "Folder upload siap dan bisa ditulis: {}",
            config.upload_dir.display()
        ),
        Err(e) => log::error!(
            "Folder upload {} tidak bisa dipakai: {}",
            config.upload_dir.display(),
            e
        ),
    }

    let listener = TcpListener::bind((config.host.as_str(), config.port))?;
    log::info!(
        "Server berjalan di http://{} (env: {})",
        listener.local_addr()?,
        config.app_env
    );

    disposisi_backend::run(listener, pool, config)?.await
}
