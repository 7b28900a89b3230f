use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::{
    api::{error, success},
    configs::open_storage,
    constants::STORAGE_PREFIX,
    modules::{
        conversation::{model::StoreStats, service::LocalConversationService},
        AppServices,
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check(
    conversation_svc: web::Data<LocalConversationService>,
) -> Result<success::Success<StoreStats>, error::Error> {
    let stats = conversation_svc.store_stats()?;

    Ok(success::Success::ok(Some(stats)).message("Server is running"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let storage = open_storage().map_err(|e| std::io::Error::other(e.to_string()))?;

    if ENV.reset_store {
        let removed = storage
            .clear_prefix(STORAGE_PREFIX)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        log::warn!("RESET_STORE set, removed {} stored keys", removed);
    }

    let services =
        AppServices::build(Arc::new(storage), Duration::from_millis(ENV.simulated_latency_ms));

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(ENV.frontend_url.as_str())
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .wrap(Logger::default())
            .configure(move |cfg| services.configure(cfg))
            .service(health_check)
            .configure(modules::configure_api)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
