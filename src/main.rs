//! Interactive volmask session.
//!
//! Loads the files given on the command line, then reads one command per
//! line from stdin. Whenever the view changes the title is printed and, if
//! requested, the rendered slice is written to the snapshot path.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use volmask::config::{AppConfig, LogLevel};
use volmask::handlers::{Response, handle_intent};
use volmask::{VolumeStore, parse_intent, render};

#[derive(Parser, Debug)]
#[command(author, about, version, long_about)]
struct Args {
    /// Scans (.nii, .nii.gz) or saved archives (.npz, .npy) to open
    files: Vec<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace (overrides the config)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Re-render the active slice to this image after every view change
    #[arg(short, long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() {
    let args = Args::parse();

    // Read config before the logger exists; report problems once it does.
    let loaded = AppConfig::load(args.config.as_deref());
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    let level = args.log_level.unwrap_or(config.preferences.log_level);
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
    if let Err(e) = &loaded {
        log::warn!("Ignoring config file, using defaults: {}", e);
    }

    if args.write_config {
        let Some(path) = args.config.clone().or_else(AppConfig::default_path) else {
            eprintln!("Error: could not determine a config directory");
            std::process::exit(1);
        };
        if let Err(e) = config.save_to_path(&path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        println!("Configuration written to {}", path.display());
        return;
    }

    let mut store = VolumeStore::with_view(config.preferences.initial_view());
    if !args.files.is_empty() {
        let report = store.load_images(args.files.as_slice());
        for e in &report.errors {
            eprintln!("Error: {}", e);
        }
    }
    present(&mut store, args.snapshot.as_ref());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        let intent = match parse_intent(&line) {
            Ok(Some(intent)) => intent,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match handle_intent(&mut store, intent) {
            Response::Done => {}
            Response::Status(text) => println!("{}", text),
            Response::Quit => break,
        }
        present(&mut store, args.snapshot.as_ref());
    }
}

/// Print the title and refresh the snapshot if the store asked for a redraw.
fn present(store: &mut VolumeStore, snapshot: Option<&PathBuf>) {
    if !store.take_redraw() {
        return;
    }
    println!("{}", render::title(store));
    if let Some(path) = snapshot {
        if let Err(e) = render::save_snapshot(store, path) {
            log::error!("Failed to write snapshot {:?}: {}", path, e);
        }
    }
    if let Err(e) = io::stdout().flush() {
        log::warn!("Failed to flush stdout: {}", e);
    }
}
