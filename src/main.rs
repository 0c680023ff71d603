use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use todod::client::{ApiClient, ListView};
use todod::config::DaemonConfig;
use todod::{rest, AppContext};

#[derive(Parser)]
#[command(
    name = "todod",
    about = "todod — in-memory todo-list daemon with an HTTP API",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP API port
    #[arg(long, env = "TODOD_PORT")]
    port: Option<u16>,

    /// Bind address for the HTTP server (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TODOD_BIND")]
    bind_address: Option<String>,

    /// Directory of extra static client assets
    #[arg(long, env = "TODOD_STATIC_DIR")]
    static_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TODOD_LOG")]
    log: Option<String>,

    /// Start with an empty list instead of the demo items
    #[arg(long)]
    no_seed: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the daemon server (default when no subcommand given).
    Serve,
    /// Print the current todo list from a running daemon.
    List,
    /// Add a todo item.
    ///
    /// Examples:
    ///   todod add "Buy milk"
    Add {
        /// Title of the new item
        title: String,
    },
    /// Delete a todo item by key.
    Rm {
        /// Key of the item to delete
        key: String,
    },
    /// Toggle a todo item's checkmark by key.
    Done {
        /// Key of the item to toggle
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = args.log.clone().unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .compact()
        .init();

    let mut config = DaemonConfig::new(args.port, args.bind_address, args.static_dir);
    if args.no_seed {
        config.seed = false;
    }

    match args.command {
        None | Some(Command::Serve) => {
            let ctx = Arc::new(AppContext::new(config));
            rest::start_rest_server(ctx).await?;
        }
        Some(Command::List) => {
            let view = connect(config.port).await?;
            print_list(&view);
        }
        Some(Command::Add { title }) => {
            let mut view = connect(config.port).await?;
            view.set_draft(title);
            if !view.submit_draft().await? {
                anyhow::bail!("title must not be blank");
            }
            print_list(&view);
        }
        Some(Command::Rm { key }) => {
            let mut view = connect(config.port).await?;
            view.remove(&key).await?;
            print_list(&view);
        }
        Some(Command::Done { key }) => {
            let mut view = connect(config.port).await?;
            view.toggle(&key).await?;
            print_list(&view);
        }
    }

    Ok(())
}

/// Build a view-model connected to the daemon on `port`, with the list loaded.
async fn connect(port: u16) -> Result<ListView> {
    let api = ApiClient::new(port);
    if !api.is_reachable().await {
        anyhow::bail!(
            "no daemon reachable on port {port}\n  Start one with `todod serve` first."
        );
    }
    let mut view = ListView::new(api);
    view.load().await?;
    Ok(view)
}

fn print_list(view: &ListView) {
    if view.is_empty() {
        println!("(no todos)");
        return;
    }
    for (key, item) in view.items() {
        let mark = if item.complete { "x" } else { " " };
        println!("[{mark}] {key:>4}  {}", item.title);
    }
}
