use std::path::PathBuf;

use clap::Parser;
use geodesic_snap::{api::create_router, logging, SnapConfig};
use log::{error, info, LevelFilter};

#[derive(Debug, Parser)]
#[command(name = "api-server")]
#[command(version)]
#[command(about = "HTTP API for right-angle snapping on the ellipsoid", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Address to bind, overrides the configuration
    #[arg(long, short)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    logging::init(LevelFilter::Info);
    let args = Args::parse();

    let mut config = match args.config.as_deref().map(SnapConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let bind = config.server.bind.clone();
    let app = match create_router(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", bind, e);
            std::process::exit(1);
        }
    };

    info!("Listening on http://{}", bind);
    info!("  POST /api/perpendicular/azimuth      {{last, penultimate, cursor}}");
    info!("  POST /api/perpendicular/destination  {{last, penultimate, cursor}}");
    info!("  POST /api/fallback                   {{last, cursor}}");
    info!("  POST /api/snap                       {{anchors, cursor}}");
    info!("  POST /api/batch                      multipart/form-data: csv");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
