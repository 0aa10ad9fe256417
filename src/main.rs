//! heart-greeting binary: CLI, logging, window and frame loop.

mod host;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use heart_greeting::app::App;
use heart_greeting::config::Config;
use heart_greeting::random::{RandomSource, StdRandom};
use macroquad::prelude::{get_time, is_key_pressed, next_frame, Conf, KeyCode};
use macroquad::Window;
use tracing::info;
use tracing_subscriber::EnvFilter;

use host::MacroquadInput;
use render::Renderer;

#[derive(Parser, Debug)]
#[command(name = "heart-greeting")]
#[command(about = "Animated greeting with a pressable heart and a hidden message")]
#[command(version)]
struct Cli {
    /// Config file path (defaults to XDG config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for confetti and stars, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn window_conf(config: &Config) -> Conf {
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width,
        window_height: config.window.height,
        fullscreen: config.window.fullscreen,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("heart_greeting=debug")
    } else {
        EnvFilter::new("heart_greeting=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(cli.config.as_deref())?;
    info!(?config, "Loaded configuration");

    let rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(StdRandom::seeded(seed)),
        None => Box::new(StdRandom::from_entropy()),
    };

    Window::from_config(window_conf(&config), run(config, rng));
    Ok(())
}

fn clock() -> Duration {
    Duration::from_secs_f64(get_time())
}

async fn run(config: Config, rng: Box<dyn RandomSource>) {
    let renderer = Renderer::load(config.text.clone()).await;
    let mut input = MacroquadInput::new();
    let mut app = App::new(&config, rng, clock());

    loop {
        let now = clock();
        let layout = render::layout();

        app.frame(now, &layout, &mut input);
        renderer.draw(&app.snapshot(), &layout);

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        next_frame().await
    }

    app.teardown();
}
