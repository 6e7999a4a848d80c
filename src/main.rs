//! Connect-N GUI
//!
//! A graphical interface for playing connect-N against the AI, simple
//! computer players or another person.

use clap::Parser;
use tracing::info;

use connectn::config::Cli;
use connectn::ui::ConnectApp;
use connectn::AIEngine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let options = cli.game_options()?;
    let kinds = cli.player_kinds()?;
    let engine = match cli.threads {
        Some(threads) => AIEngine::with_config(cli.depth, threads),
        None => {
            let mut engine = AIEngine::new();
            engine.set_max_depth(cli.depth);
            engine
        }
    };
    info!(
        border = options.border,
        strike_length = options.strike_length,
        p1 = %kinds[0],
        p2 = %kinds[1],
        depth = engine.max_depth(),
        threads = engine.threads(),
        "starting"
    );

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(format!("Connect {}", options.strike_length)),
        ..Default::default()
    };
    let track_depth = cli.track_depth;

    eframe::run_native(
        "Connect-N",
        native,
        Box::new(move |cc| Ok(Box::new(ConnectApp::new(cc, options, kinds, engine, track_depth)))),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("connectn=debug")
        } else {
            EnvFilter::new("connectn=info")
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
