mod app;
mod cli;
mod config;
mod dashboard;
mod demo;
mod error;
mod model;
mod pages;
mod paths;
mod ui;

use std::fs;
use std::fs::File;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use simplelog::Config as LogConfig;
use simplelog::{LevelFilter, WriteLogger};

use crate::app::App;
use crate::cli::Args;
use crate::config::Config;

/// Starts file logging in the cache directory. Failures are reported on
/// stderr and the run continues without a log.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("Warning: no cache directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent()
        && let Err(e) = fs::create_dir_all(dir)
    {
        eprintln!("Warning: could not create {}: {}", dir.display(), e);
        return;
    }
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: could not create {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = WriteLogger::init(level, LogConfig::default(), file) {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    init_logging(config.log_level);
    log::info!("ventures {} starting", env!("CARGO_PKG_VERSION"));

    let mut stdout = io::stdout();
    let result = match App::connect(&config, args.demo) {
        Ok(app) => app.run(args.command(), &mut stdout).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            let _ = ui::error(&mut io::stderr(), &e.to_string());
            ExitCode::FAILURE
        }
    }
}
