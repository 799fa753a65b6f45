use std::{env, process};

use anyhow::Context;
use log::info;
use specs::Options;
use tokio::signal;

/// The environment variable read when no options file is given as argument.
const CONFIG_VAR: &str = "ORCHESTRA_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match env::args().nth(1).or_else(|| env::var(CONFIG_VAR).ok()) {
        Some(path) => {
            info!("loading options from {path}");
            Options::load(&path).with_context(|| format!("loading {path}"))?
        }
        None => {
            info!("no options file given, using the defaults");
            Options::default()
        }
    };

    tokio::select! {
        exits = orchestrator::run(options) => {
            let exits = exits?;
            info!("all {} roles joined", exits.len());
        }
        _ = signal::ctrl_c() => {
            info!("received SIGINT");
            // role workers are blocking loops, they can't be cancelled
            process::exit(130);
        }
    }

    Ok(())
}
