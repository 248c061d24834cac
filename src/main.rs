use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use promptgate::connector::api::{http, Container, ContainerConfig, Router};
use promptgate::{Commands, GeminiConfig};

#[derive(Parser)]
#[command(name = "promptgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.promptgate")]
    data_dir: String,

    /// Keep history in memory only
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Answer prompts locally without calling Gemini
    #[arg(long, global = true)]
    mock_generator: bool,

    /// JSON file mapping usernames to {"password", "token"}
    #[arg(long, global = true)]
    users_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = expand_tilde(&cli.data_dir);
    if !cli.memory_storage {
        std::fs::create_dir_all(&data_dir)?;
    }

    let config = ContainerConfig {
        data_dir,
        memory_storage: cli.memory_storage,
        mock_generator: cli.mock_generator,
        users_file: cli.users_file.as_deref().map(expand_tilde),
        gemini: GeminiConfig::from_env(),
    };
    debug!("Gemini configuration: {:?}", config.gemini);

    let container = Container::new(config)?;

    match cli.command {
        Commands::Serve { port, public } => {
            let ip = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            http::serve(Arc::new(container), SocketAddr::new(ip, port)).await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
