//! Application entry point for the particle field viewer.
//!
//! This binary parses the command line, loads the configuration, and
//! sets up eframe/egui; all interactive logic and rendering live in
//! [`FieldApp`] from the `app` module.

mod app;

use app::FieldApp;
use clap::Parser;
use field_core::config::FieldConfig;
use rand::Rng;

/// Command line options for the particle field viewer.
#[derive(Parser, Debug)]
#[command(about = "Animated particle field with pointer interaction")]
struct Args {
    /// Path the configuration is loaded from and saved to.
    #[arg(long, default_value = "field.json")]
    config: String,

    /// Seed for particle generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the animation paused.
    #[arg(long)]
    paused: bool,
}

/// Starts the native eframe application.
///
/// A missing or unreadable config file is not an error; the app logs
/// the reason and starts from [`FieldConfig::default`] so the window
/// always comes up.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = match FieldConfig::load(&args.config) {
        Ok(cfg) => {
            log::info!("loaded config from {}", args.config);
            cfg
        }
        Err(err) => {
            log::info!("using default config ({err})");
            FieldConfig::default()
        }
    };

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("particle seed = {seed}");

    let app = FieldApp::new(cfg, args.config, seed, args.paused);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Particle Field"),
        ..Default::default()
    };

    eframe::run_native(
        "Particle Field",
        options,
        Box::new(move |_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(app))
        }),
    )
}
