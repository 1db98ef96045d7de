//! Binary entry point for the university records service.

mod server;

use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use backend::inbound::http::health::HealthState;
use server::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing subscriber already initialised");
    }

    let config = AppConfig::parse();
    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(&config, health_state.clone())?;
    health_state.mark_ready();
    info!(ip = %config.ip, port = config.port, "listening");
    server.await
}
