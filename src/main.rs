use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use subgate::config::{CommonConfig, PathSet};
use subgate::server::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct ServerArgs {
    /// Print server configuration data (JSON) and exit.
    #[arg(long)]
    pub print_config: bool,

    /// The config directory, `server.toml` is loaded from it. Defaults to
    /// `$SUBGATE_CONFIG`, `/etc/subgate` for root, else `~/.config/subgate`.
    #[arg(long)]
    pub config_path: Option<PathBuf>,
}

async fn run(args: ServerArgs) -> Result<()> {
    let ps = PathSet::new(args.config_path)?;
    let cfg: ServerConfig = ps.load_config("server", ServerConfig::default)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    cfg.log.init()?;

    let srv = cfg.build_restful_server()?;
    srv.run().await.context("run restful server")?;

    info!("Server exited by user");
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();
    if let Err(e) = run(args).await {
        error!("Error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
