use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pb_core::config::AppConfig;
use pb_terminal::bootstrap::{
    fill_missing, init_tracing_subscriber, load_config, wire_dependencies,
};
use pb_terminal::view::{run_login, run_registration, TerminalPresenter};
use tokio::io::BufReader;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pocketbank")]
#[command(about = "PocketBank client: open an account or sign in", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new account (default)
    Register,
    /// Sign in with CPF and password
    Login {
        /// CPF, masked or digits only
        #[arg(long)]
        cpf: String,
    },
    /// Forget the stored session
    Logout,
}

/// File values win; anything the file leaves empty comes from the system
/// defaults.
fn resolve_config(config_path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let data_dir = pb_infra::fs::app_data_dir()?;
    let defaults = AppConfig::with_system_defaults(data_dir);
    match config_path {
        Some(path) => Ok(fill_missing(load_config(path)?, defaults)),
        None => Ok(defaults),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be read before the tracing filter looks at RUST_LOG
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = resolve_config(cli.config).context("Failed to load configuration")?;

    if let Err(err) = init_tracing_subscriber(&config.log_dir) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "PocketBank starting");

    let deps = wire_dependencies(&config, Arc::new(TerminalPresenter::stdout()))
        .context("Failed to wire dependencies")?;
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    let result = match cli.command.unwrap_or(Commands::Register) {
        Commands::Register => run_registration(&deps.registration, stdin, &mut stdout)
            .await
            .map(|outcome| {
                info!(created = outcome.is_some(), "registration finished");
            }),
        Commands::Login { cpf } => run_login(&deps.sign_in, &cpf, stdin, &mut stdout)
            .await
            .map(|route| {
                info!(?route, "sign-in finished");
            }),
        Commands::Logout => deps
            .sign_in
            .sign_out()
            .await
            .map(|()| println!("Signed out."))
            .map_err(anyhow::Error::from),
    };

    if let Err(err) = &result {
        error!(error = %err, "command failed");
    }
    result
}
