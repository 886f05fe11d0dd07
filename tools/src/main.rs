//! gridiron-server: HTTP front end and periodic simulator for Gridiron.
//!
//! Usage:
//!   gridiron-server --config league.json
//!   gridiron-server --seed 12345 --interval 5 --store sqlite --store-path league.db
//!   gridiron-server --games-per-season 45 --end-season 1930

use anyhow::Result;
use gridiron_core::{
    config::SimConfig,
    engine::SimEngine,
    server::create_router,
    simulator::SimHandle,
    store::StoreBackend,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = build_config(&args)?;

    println!("Gridiron season simulator");
    println!("  epoch:            {}", config.epoch);
    println!("  games per season: {}", config.games_per_season);
    println!("  interval:         {}s", config.tick_interval_secs);
    match config.end_season {
        Some(end) => println!("  end season:       {end}"),
        None      => println!("  end season:       (unbounded)"),
    }
    match config.seed {
        Some(seed) => println!("  seed:             {seed}"),
        None       => println!("  seed:             (entropy)"),
    }
    println!("  store:            {:?} {}", config.store.backend, config.store.path);
    println!();

    let engine = SimEngine::build(&config)?;
    let handle = SimHandle::new(engine);
    let simulation = handle.spawn_periodic();

    let app = create_router(handle);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    simulation.abort();
    log::info!("Server stopped");
    Ok(())
}

/// Config file first (if given), then command-line overrides.
fn build_config(args: &[String]) -> Result<SimConfig> {
    let mut config = match find_arg(args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    config.epoch = parse_arg(args, "--epoch", config.epoch);
    config.games_per_season = parse_arg(args, "--games-per-season", config.games_per_season);
    config.tick_interval_secs = parse_arg(args, "--interval", config.tick_interval_secs);
    if let Some(end) = find_arg(args, "--end-season").and_then(|v| v.parse().ok()) {
        config.end_season = Some(end);
    }
    if let Some(seed) = find_arg(args, "--seed").and_then(|v| v.parse().ok()) {
        config.seed = Some(seed);
    }
    if let Some(backend) = find_arg(args, "--store") {
        config.store.backend = backend.parse::<StoreBackend>().map_err(anyhow::Error::msg)?;
    }
    if let Some(path) = find_arg(args, "--store-path") {
        config.store.path = path.to_string();
    }
    if let Some(bind) = find_arg(args, "--bind") {
        config.bind_addr = bind.to_string();
    }

    config.validate()?;
    Ok(config)
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
