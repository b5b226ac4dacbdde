use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use std::{fs::File, io::BufReader};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use log4rs::init_file;
use log::{info, warn};

mod apis;
mod cores;
mod configs;
mod middleware;
mod utils;

use crate::apis::api_doc::ApiDoc;
use crate::apis::app_state::AppState;
use crate::apis::design_api::upload::multipart_config;
use crate::configs::settings::{Config, TlsConfig};
use crate::middleware::access_log::AccessLog;

#[cfg(test)]
mod test;

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

fn load_tls_config(tls: &TlsConfig) -> std::io::Result<rustls::ServerConfig> {
    let mut certs_file = BufReader::new(File::open(&tls.cert_file)?);
    let mut key_file = BufReader::new(File::open(&tls.key_file)?);

    let tls_certs = rustls_pemfile::certs(&mut certs_file)
        .collect::<Result<Vec<_>, _>>()?;
    let tls_key = rustls_pemfile::private_key(&mut key_file)?
        .ok_or_else(|| io_error("TLS setup failed", format!("no private key in {}", tls.key_file)))?;

    rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(tls_certs, tls_key)
        .map_err(|e| io_error("TLS setup failed", e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let env_loaded = dotenv::dotenv().is_ok();

    let config = Config::load_config().map_err(|e| io_error("Config load failed", e))?;
    init_file(&config.log_config_path, Default::default())
        .map_err(|e| io_error("Logger setup failed", e))?;
    if !env_loaded {
        warn!("No .env file found, using system environment variables");
    }

    let state = web::Data::new(
        AppState::from_config(&config).map_err(|e| io_error("HTTP client setup failed", e))?,
    );
    let max_body_bytes = config.max_body_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Content-Type", "User-Agent"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(AccessLog)
            .app_data(state.clone())
            .app_data(multipart_config(max_body_bytes))
            .configure(apis::design_api::design::configure)
            .configure(apis::design_api::upload::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
    });

    let address = (config.bind_address.as_str(), config.port);
    match &config.tls {
        Some(tls) => {
            info!("Starting server on https://{}:{}", address.0, address.1);
            server.bind_rustls_0_23(address, load_tls_config(tls)?)?.run().await
        }
        None => {
            info!("Starting server on http://{}:{}", address.0, address.1);
            server.bind(address)?.run().await
        }
    }
}
