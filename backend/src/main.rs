use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use backend::config::ServerConfig;
use backend::services;
use backend::store::{fixture, Database};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(io::Error::other)?;
    let database = Database::open(config.database_path.clone()).map_err(io::Error::other)?;
    info!("Using database {}", database.path().display());

    if let Some(path) = &config.fixture_path {
        let loaded = fixture::load(path).map_err(io::Error::other)?;
        let mut conn = database.connect().map_err(io::Error::other)?;
        let summary = fixture::apply(&mut conn, &loaded).map_err(io::Error::other)?;
        info!(
            "Applied fixture {}: {} professors, {} modules, {} module instances",
            path.display(),
            summary.professors,
            summary.modules,
            summary.module_instances
        );
    }

    match config.token_ttl {
        Some(ttl) => info!("Tokens expire after {} seconds", ttl.as_secs()),
        None => info!("Tokens never expire"),
    }

    let host = config.host.clone();
    let port = config.port;
    info!("Server running at http://{}:{}", host, port);

    let database = web::Data::new(database);
    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(database.clone())
            .app_data(config.clone())
            .configure(services::configure_app)
            .default_service(web::route().to(services::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
