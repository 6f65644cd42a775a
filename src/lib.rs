// src/lib.rs
use actix_cors::Cors;
use actix_files::Files;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::json;
use sqlx::SqlitePool;
use std::net::TcpListener;

pub mod client;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod payload;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

use config::AppConfig;
use error::AppError;

fn cors(origin: &str) -> Cors {
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

/// Rangkai aplikasi lengkap: middleware, file statis `/uploads`, dan semua route API.
pub fn build_app(
    pool: SqlitePool,
    config: AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let upload_dir = config.upload_dir.clone();

    // Salah format di path/query tetap dijawab `{"error"}` 400
    let path_config = web::PathConfig::default().error_handler(|err, req| {
        log::warn!("Path error {}: {}", req.path(), err);
        AppError::validasi(format!("Parameter tidak valid: {}", err)).into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("Query error {}: {}", req.path(), err);
        AppError::validasi(format!("Query tidak valid: {}", err)).into()
    });

    App::new()
        .app_data(web::Data::new(pool))
        .app_data(path_config)
        .app_data(query_config)
        .wrap(cors(&config.cors_origin))
        .wrap(Logger::default())
        .app_data(web::Data::new(config))
        .configure(controllers::configure)
        .service(Files::new(utils::UPLOAD_URL_PREFIX, upload_dir))
        .default_service(web::to(|| async {
            HttpResponse::NotFound().json(json!({ "error": "Not found" }))
        }))
}

pub fn run(listener: TcpListener, pool: SqlitePool, config: AppConfig) -> std::io::Result<Server> {
    let server = HttpServer::new(move || build_app(pool.clone(), config.clone()))
        .listen(listener)?
        .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use crate::test_support;
    use actix_web::test;
    use pretty_assertions::assert_eq;

    #[actix_web::test]
    async fn id_bukan_angka_400_json() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;

        for req in [
            test::TestRequest::delete().uri("/api/surat-masuk/abc"),
            test::TestRequest::put().uri("/api/agenda/1x"),
            test::TestRequest::get().uri("/api/disposisi/satu"),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), 400);

            let body: serde_json::Value = test::read_body_json(resp).await;
            let pesan = body["error"].as_str().unwrap();
            assert!(pesan.starts_with("Parameter tidak valid"), "error: {}", pesan);
        }
    }

    #[actix_web::test]
    async fn route_tidak_dikenal_404_json() {
        let env = test_support::Lingkungan::baru().await;
        let app = test::init_service(env.app()).await;

        let req = test::TestRequest::get().uri("/api/tidak-ada").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Not found");
    }
}
