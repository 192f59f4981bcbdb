#![deny(warnings)]

use std::io;

use account_api::{config, database, router};
use account_api_migration::{Migrator, MigratorTrait};
use actix_cors::Cors;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use tracing_subscriber::EnvFilter;

#[actix::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let db = database::connect(&config.database)
        .await
        .map_err(io::Error::other)?;

    Migrator::up(&db, None).await.map_err(io::Error::other)?;

    let address = (config.server.host.clone(), config.server.port);
    let workers = config.server.workers;
    let auth = config.auth.clone();

    tracing::info!(host = %address.0, port = address.1, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(Data::new(db.clone()))
            .app_data(Data::new(auth.clone()))
            .configure(router::route)
    })
    .workers(workers)
    .bind(address)?
    .run()
    .await
}
