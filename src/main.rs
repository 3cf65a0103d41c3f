use std::path::PathBuf;

use anyhow::Context;
use artplay::{Config, demo};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "artplay")]
#[command(version, about = "3D stroke drawing core with grab-and-throw physics")]
struct Cli {
    /// Run a scripted headless session (draw, throw, undo, clear)
    #[arg(long, action = ArgAction::SetTrue)]
    demo: bool,

    /// Print the effective configuration as TOML
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,

    /// Load configuration from this file instead of ~/.config/artplay/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if !cli.demo && !cli.print_config {
        // No flags: show usage
        println!("artplay: 3D stroke drawing core with grab-and-throw physics");
        println!();
        println!("Usage:");
        println!("  artplay --demo            Run a scripted headless session");
        println!("  artplay --print-config    Print the effective configuration");
        println!("  artplay --config <PATH>   Use a specific config file");
        println!("  artplay --help            Show help");
        println!();
        println!("Default controls (pointer + keyboard):");
        println!("  - Draw: drag in draw mode (D)");
        println!("  - Grab and throw: drag a stroke in grab mode (G), release while moving");
        println!("  - Orbit camera: navigate mode (O), right drag, or two fingers");
        println!("  - Colors: 1-9, width: + / -, undo: Ctrl+Z, clear: C");
        return Ok(());
    }

    let config = load_config(cli.config.as_ref())?;

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
    }

    if cli.demo {
        log::info!("Running headless demo session");
        let report = demo::run_demo(&config)?;
        println!("{report}");
    }

    Ok(())
}
