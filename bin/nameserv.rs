use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use nameserv::{config::Config, logging, server::tls, MappingStore, Server, ServerError};

async fn run(config: Config) -> Result<(), ServerError> {
    // load names
    let store = MappingStore::from_file(&config.names, config.name_policy())?;
    info!(
        "Loaded {} names from {}",
        store.len(),
        config.names.display()
    );

    // create server
    let mut server = Server::bind(config.addr, Arc::new(store))
        .await?
        .with_shutdown_timeout(config.shutdown_timeout());
    if let Some((cert, key)) = config.tls_paths() {
        server = server.with_tls(tls::load_acceptor(cert, key)?);
    }

    info!("Serving on {}", server.local_addr()?);

    server.serve(interrupted()).await
}

/// Completes on Ctrl-C.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Error: listen for interrupt: {}", err);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // enable logging
    logging::enable_console_log(config.log_level);

    if let Err(err) = run(config).await {
        error!("Error: {}", err);
        std::process::exit(1);
    }
}
