use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{error, info};

mod commands;
mod config;
mod error;
mod logging;
mod models;
mod state;
mod storage;
mod web;

use commands::Command;
use config::StoreConfig;
use state::{create_shared_record_store, RecordStore};
use storage::{FileStorage, MemoryStorage, StorageBackend};
use web::{start_web_server, WebServerConfig};

/// Local record store for the coding club's contests and applications
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the JSON collections (overrides STORE_PATH)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep records in memory only; nothing is written to disk
    #[arg(long, global = true)]
    memory: bool,

    /// Log level (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn open_store(config: &StoreConfig) -> Result<RecordStore> {
    let backend: Box<dyn StorageBackend> = if config.in_memory {
        match config.memory_quota {
            Some(quota) => Box::new(MemoryStorage::with_quota(quota)),
            None => Box::new(MemoryStorage::new()),
        }
    } else {
        Box::new(FileStorage::open(&config.data_dir)?)
    };
    Ok(RecordStore::with_keys(backend, config.keys.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = StoreConfig::from_env();
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if args.memory {
        config.in_memory = true;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    logging::init(&config.log_level);

    let mut store = open_store(&config)?;

    match args.command {
        Command::Serve { port } => {
            let mut web_config = WebServerConfig::from_env();
            if let Some(port) = port {
                web_config.port = port;
            }

            info!("Starting dashboard API...");
            let shared_store = create_shared_record_store(store);
            if let Err(e) = start_web_server(web_config, shared_store).await {
                error!("Web server error: {}", e);
                return Err(e);
            }
        }
        command => {
            let output = commands::run(&mut store, command)?;
            println!("{}", output.body);
            if !output.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
