//! Orbit sprite demo entry point.
//!
//! Runs the demo against the headless host: every native call is logged (set
//! `RUST_LOG=debug` to see them) and counted in the exit summary.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 800 --simulate-input
//! ```

use clap::Parser;
use log::{error, info, warn};
use orbitdemo::game::Demo;
use orbitdemo::resources::democonfig::DemoConfig;
use orbitdemo::resources::inputqueue::InputEvent;
use orbitdemo::resources::nativehost::HeadlessHost;
use std::path::PathBuf;

/// Orbiting-camera sprite demo
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Frames per second used for the tick delta.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Lua init script. Overrides `[script] path` from the config.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Feed a two-finger press/move/release gesture from a separate input thread.
    #[arg(long)]
    simulate_input: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = DemoConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        warn!("Using default configuration: {}", e);
    }
    if let Some(script) = cli.script {
        config.script_path = Some(script);
    }

    let host = HeadlessHost::new(config.screen_width, config.screen_height);
    let call_log = host.call_log();
    let mut demo = Demo::new(host, config);

    if let Err(e) = demo.init() {
        error!("init error: {}", e);
    }

    if cli.simulate_input {
        let sender = demo.input_sender();
        let handle = std::thread::spawn(move || {
            let gesture = [
                InputEvent::pressed(0, 100.0, 100.0),
                InputEvent::moved(0, 150.0, 120.0),
                InputEvent::pressed(1, 400.0, 300.0),
                InputEvent::moved(0, 200.0, 140.0),
                InputEvent::released(1),
                InputEvent::released(0),
            ];
            for event in gesture {
                if !sender.add_input(event) {
                    break;
                }
            }
        });
        if handle.join().is_err() {
            warn!("Input thread panicked");
        }
    }

    let dt = 1.0 / cli.fps.max(1) as f32;
    for _ in 0..cli.ticks {
        demo.tick(dt);
    }

    let orbit = demo.orbit();
    info!(
        "Ran {} ticks: radius={:.3} angle={} sign={}",
        demo.frame_count(),
        orbit.radius,
        orbit.angle,
        orbit.sign
    );
    for name in [
        "get_screen_dimensions",
        "cache_texture",
        "set_camera",
        "clear_screen",
        "render",
        "unproject",
        "cache_sound",
        "play_sound",
        "set_background_playing",
    ] {
        info!("  {:<22} {}", name, call_log.count(name));
    }
}
