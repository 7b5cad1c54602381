mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "automem")]
#[command(about = "Automatic long-term memory filter for LLM chat", long_about = None)]
struct Cli {
    /// Memory database file
    #[arg(long, global = true, env = "AUTOMEM_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP filter server
    Serve {
        #[arg(short, long, default_value = "37780")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Run the inlet hook on a chat body (file or stdin) and print the result
    Inlet {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List a user's memories
    Memories {
        #[arg(short, long)]
        user: String,
    },
    /// Store a memory directly
    Add {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        content: String,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
}

pub(crate) fn get_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("automem").join("memory.db")
    })
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let db_path = get_db_path(cli.db);

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(&db_path, port, &host).await,
        Commands::Inlet { user, input } => commands::inlet::run(&db_path, &user, input.as_deref()).await,
        Commands::Memories { user } => commands::memories::list(&db_path, &user).await,
        Commands::Add { user, content, tags } => commands::memories::add(&db_path, &user, &content, &tags).await,
    }
}
