//! Delve server binary.
//!
//! Loads configuration, builds the world (from YAML files or the built-in
//! classic world), moves it into a single world task, and runs the chosen
//! line-oriented front end.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `delve-config.yaml` (or `DELVE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the world map and action catalog
//! 4. Spawn the world task
//! 5. Serve stdin or TCP until the session ends

mod config;
mod error;
mod session;

use delve_engine::{World, create_starting_actions, load_actions};
use delve_world::{create_starting_world, load_world};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{FrontendMode, WorldSourceConfig, load_config};
use crate::error::ServerError;
use crate::session::WorldHandle;

/// Application entry point for the Delve server.
///
/// # Errors
///
/// Returns an error if configuration, world loading, or the front end
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration; its log level is the fallback filter.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("delve-server starting");
    info!(
        config_path = ?config_path,
        mode = %config.frontend.mode,
        listen_addr = %config.frontend.listen_addr,
        queue_depth = config.frontend.queue_depth,
        "Configuration loaded"
    );

    // 3. Build the world.
    let world = build_world(&config.world)?;

    // 4. Hand it to the world task.
    let (handle, task) = WorldHandle::spawn(world, config.frontend.queue_depth);

    // 5. Serve.
    match config.frontend.mode {
        FrontendMode::Stdin => session::run_stdin(&handle).await?,
        FrontendMode::Tcp => {
            let listener = session::bind(&config.frontend.listen_addr).await?;
            session::run_tcp(handle.clone(), listener).await?;
        }
    }

    drop(handle);
    let world = task.await?;
    info!(players = world.players.len(), "delve-server stopped");
    Ok(())
}

/// Build the world from configured files, falling back to the built-in
/// classic world and actions for whichever file is not set.
fn build_world(source: &WorldSourceConfig) -> Result<World, ServerError> {
    let map = if let Some(path) = &source.entities_file {
        load_world(path)?
    } else {
        info!("No world file configured, using the built-in world");
        create_starting_world()?
    };

    let catalog = if let Some(path) = &source.actions_file {
        load_actions(path)?
    } else {
        info!("No actions file configured, using the built-in actions");
        create_starting_actions()
    };

    info!(
        location_count = map.location_count(),
        starting_location = map.starting_location(),
        trigger_count = catalog.trigger_count(),
        "World ready"
    );
    Ok(World::new(map, catalog))
}
