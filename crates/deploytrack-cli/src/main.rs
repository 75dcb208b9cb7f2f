//! deploytrack CLI tool.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "deploytrack")]
#[command(about = "Deployment tracking CLI", long_about = None)]
struct Cli {
    /// API server URL
    #[arg(long, default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all deployments
    List,
    /// Show one deployment
    Show {
        /// Deployment ID
        id: String,
    },
    /// Record a new deployment
    Create {
        /// Application name
        #[arg(long)]
        app: String,
        /// Target environment
        #[arg(long)]
        env: String,
        /// Initial status
        #[arg(long, default_value = "queued")]
        status: String,
        /// Commit hash being deployed
        #[arg(long, default_value = "")]
        commit: String,
        /// Branch being deployed
        #[arg(long, default_value = "main")]
        branch: String,
    },
    /// Change the status of a deployment
    Update {
        /// Deployment ID
        id: String,
        /// New status
        #[arg(long)]
        status: String,
        /// Mark the deployment as completed now
        #[arg(long)]
        completed: bool,
    },
    /// Load sample deployments into the server
    Seed,
    /// Validate a server configuration file
    Validate {
        /// Path to the configuration file
        #[arg(default_value = "deploytrack.kdl")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            commands::list(&cli.api_url).await?;
        }
        Commands::Show { id } => {
            commands::show(&cli.api_url, &id).await?;
        }
        Commands::Create {
            app,
            env,
            status,
            commit,
            branch,
        } => {
            commands::create(&cli.api_url, app, env, status, commit, branch).await?;
        }
        Commands::Update {
            id,
            status,
            completed,
        } => {
            commands::update(&cli.api_url, &id, status, completed).await?;
        }
        Commands::Seed => {
            commands::seed(&cli.api_url).await?;
        }
        Commands::Validate { path } => {
            commands::validate(&path)?;
        }
    }

    Ok(())
}
