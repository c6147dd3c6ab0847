use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wanderer_assets::load_animated_model;
use wanderer_character::Player;
use wanderer_game::cli::Args;
use wanderer_game::{load_config, Game, WandererApp};
use winit::event_loop::EventLoop;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    run(&args).inspect_err(|e| tracing::error!("{e:#}"))
}

fn run(args: &Args) -> Result<()> {
    tracing::info!("Wanderer v{}", env!("CARGO_PKG_VERSION"));

    let config = args.apply(load_config(&args.config)?);

    let model_path = &config.player.model_path;
    let model = load_animated_model(model_path)
        .with_context(|| format!("failed to load character model {}", model_path.display()))?;
    let player = Player::new(model, config.player.clone())
        .context("character model does not fit the clip bindings")?;
    let game = Game::new(config.camera.to_camera(), player, config.debug);

    let event_loop = EventLoop::new()?;
    let mut app = WandererApp::new(config, game, args.frames);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
