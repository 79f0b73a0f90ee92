use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use zcalc::calculator::Readout;
use zcalc::config::Config;
use zcalc::session::Session;

#[derive(Parser)]
#[command(name = "zcalc")]
#[command(about = "A keypad calculator for the terminal", long_about = None)]
struct Cli {
    /// Key sequence to run once, e.g. "12+3="
    #[arg(short, long)]
    keys: Option<String>,

    /// Print the final state as JSON (with --keys)
    #[arg(long, requires = "keys")]
    json: bool,

    /// Config file (default: $ZCALC_CONFIG or ~/.config/zcalc/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut session = Session::new(config.group_separator);

    match cli.keys {
        Some(keys) => run_once(&mut session, &keys, cli.json),
        None => run_interactive(&mut session, &config),
    }
}

fn run_once(session: &mut Session, keys: &str, json: bool) -> Result<()> {
    for e in session.feed(keys) {
        warn!("{}", e);
    }

    if json {
        let out = serde_json::json!({
            "state": session.state(),
            "readout": session.readout(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_readout(&session.readout());
    }
    Ok(())
}

fn run_interactive(session: &mut Session, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", config.prompt);
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read input")?;

        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        for e in session.feed(&line) {
            eprintln!("{}", e);
        }

        print_readout(&session.readout());
        if config.show_state {
            println!("{:?}", session.state());
        }
    }

    Ok(())
}

fn print_readout(readout: &Readout) {
    println!("{}", readout.previous);
    println!("{}", readout.current);
}
