use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use viewfinder::capture::{CameraBackendFactory, CameraSource, CaptureConfig};
use viewfinder::{
    create_router, AppState, BusClient, CameraController, Config, MediaLibrary, SessionConfig,
};

#[derive(Parser)]
#[command(name = "viewfinder")]
#[command(about = "Headless camera capture service")]
struct Args {
    /// Config file (TOML, extension omitted)
    #[arg(short, long, default_value = "config/viewfinder")]
    config: String,

    /// Listen address (host:port), overrides the config file
    #[arg(short, long)]
    listen: Option<String>,

    /// Library root directory, overrides the config file
    #[arg(long)]
    library_root: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("viewfinder=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Viewfinder v0.1.0");
    info!("Loaded config: {}", cfg.service.name);

    let library = MediaLibrary::new(
        PathBuf::from(args.library_root.unwrap_or_else(|| cfg.library.root.clone())),
        cfg.library.album.clone(),
    )?;
    let library_root = library.root().to_path_buf();

    let mut capture_config = CaptureConfig {
        facing: cfg.camera.facing,
        frame_rate: cfg.camera.frame_rate,
        width: cfg.camera.width,
        height: cfg.camera.height,
        format: cfg.camera.format.clone(),
        ..CaptureConfig::default()
    };
    if let Some(staging) = &cfg.camera.staging_path {
        capture_config.staging_dir = PathBuf::from(staging);
    }

    let source = match cfg.camera.backend.as_str() {
        "synthetic" => CameraSource::Synthetic,
        other => CameraSource::Device(other.to_string()),
    };
    let backend = CameraBackendFactory::create(source, capture_config)
        .context("Failed to create camera backend")?;

    let session_config = SessionConfig {
        facing: cfg.camera.facing,
        flash: cfg.camera.flash,
        mode: cfg.camera.mode,
        ..SessionConfig::default()
    };

    let controller = Arc::new(Mutex::new(CameraController::new(
        session_config,
        backend,
        library,
    )));

    // Optional NATS bridge
    if let Some(url) = &cfg.bus.url {
        let bus = Arc::new(
            BusClient::connect(url, cfg.bus.subject_prefix.clone())
                .await
                .context("Failed to connect to NATS")?,
        );

        let events = controller.lock().await.subscribe();
        tokio::spawn(viewfinder::events::forward_events(Arc::clone(&bus), events));

        let remote_controller = Arc::clone(&controller);
        tokio::spawn(async move {
            if let Err(e) = viewfinder::events::listen_remote(bus, remote_controller).await {
                error!("Remote trigger listener failed: {}", e);
            }
        });
    }

    let app = create_router(AppState::new(Arc::clone(&controller)), &library_root);

    let addr = args
        .listen
        .unwrap_or_else(|| format!("{}:{}", cfg.service.http.bind, cfg.service.http.port));

    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app).await?;

    Ok(())
}
