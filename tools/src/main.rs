mod runner;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use redpanda_core::Config;
use runner::{Output, Simulator};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Drive the RedPanda keyboard from a script and print what it emits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Keyboard config (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Script file. Reads stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => Config::load_toml(path)?,
        None => Config::default(),
    };

    let source = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading script from stdin")?;
            buf
        }
    };
    let commands = script::parse_script(&source)?;

    let mut sim = Simulator::new(&config)?;
    for output in sim.run(&commands) {
        match output {
            Output::Event(stamped) if args.json => {
                println!("{}", serde_json::to_string(&stamped)?);
            }
            Output::Event(stamped) => println!("[{:>6} ms] {}", stamped.t_ms, stamped.event),
            Output::Layout(text) if args.json => {
                println!("{}", serde_json::json!({ "layout": text }));
            }
            Output::Layout(text) => println!("{}", text),
        }
    }

    if args.json {
        println!("{}", serde_json::json!({ "text": sim.text() }));
    } else {
        println!("text: {:?}", sim.text());
    }
    Ok(())
}
