use actix_web::{App, HttpServer};
use std::io;

use relay_server::config::ServerConfig;
use relay_server::handlers;
use relay_server::server::spawn_server;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env().map_err(|err| {
        log::error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let srv_tx = spawn_server();

    let server = HttpServer::new(move || {
        App::new()
            .data(srv_tx.clone())
            .configure(handlers::root)
    })
    .bind(config.bind_address())?;

    log::info!("Server is up and running on port {}", config.port);
    server.run().await
}
