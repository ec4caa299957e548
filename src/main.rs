use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

mod cli;
use cli::{Cli, Command};

mod config;
use config::Settings;

mod core;
use crate::core::analysis::{analyze_split, check_integrity};
use crate::core::split::{split_dataset, SplitOptions};

mod logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().or_else(Settings::default_path);
    let loaded = settings_path.as_deref().map(Settings::load);
    let settings = match &loaded {
        Some(Ok(settings)) => settings.clone(),
        _ => Settings::default(),
    };

    let log_dir = cli.log_dir.clone().or_else(|| settings.log_dir.clone());
    if let Err(e) = logging::setup_logging(log_dir.as_deref()) {
        eprintln!("Failed to create log file in {:?}: {}", log_dir, e);
        return ExitCode::FAILURE;
    }

    match (&loaded, &settings_path) {
        (Some(Ok(_)), Some(path)) => debug!("Settings loaded from {:?}", path),
        (Some(Err(e)), Some(path)) => {
            warn!("Failed to load settings from {:?}: {}. Using defaults.", path, e)
        }
        _ => warn!("Could not determine config directory. Using defaults."),
    }

    match run(cli, settings, settings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(
    cli: Cli,
    settings: Settings,
    settings_path: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Split {
            data_dir,
            train_ratio,
            seed,
        } => {
            let options = SplitOptions {
                train_ratio: train_ratio.unwrap_or(settings.train_ratio),
                seed: seed.or(settings.seed),
            };
            info!(
                "Splitting {:?} (train ratio {}, seed {:?})",
                data_dir, options.train_ratio, options.seed
            );
            let summary = split_dataset(&data_dir, &options)?;
            summary.print_summary();
        }
        Command::Check { data_dir } => {
            let stats = check_integrity(&data_dir)?;
            stats.print_summary();
        }
        Command::Stats { split_dir } => {
            let stats = analyze_split(&split_dir)?;
            stats.print_summary();
        }
        Command::Config {
            train_ratio,
            seed,
            clear_seed,
        } => {
            let path = settings_path.ok_or("Could not determine config directory; pass --config")?;
            let mut updated = settings;
            if let Some(ratio) = train_ratio {
                updated.train_ratio = ratio;
            }
            if let Some(seed) = seed {
                updated.seed = Some(seed);
            }
            if clear_seed {
                updated.seed = None;
            }
            if let Some(dir) = cli.log_dir {
                updated.log_dir = Some(dir);
            }
            updated.validate()?;
            updated.save(&path)?;
            info!("Current settings: {:?}", updated);
        }
    }

    Ok(())
}
