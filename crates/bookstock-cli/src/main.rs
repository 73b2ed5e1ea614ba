use anyhow::Result;
use bookstock_import::Config;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod shell;

#[derive(Debug, Parser)]
#[command(name = "bookstock", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the database (default: ~/.local/share/bookstock/books.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Skip the first-run import and fall back to the offline sample books
    #[arg(long, global = true)]
    offline: bool,

    /// Maximum number of books to request on first run
    #[arg(long, global = true)]
    import_limit: Option<usize>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Start the interactive stock shell (the default)
    ///
    /// On first run the catalog is filled from Open Library; if that fails,
    /// two offline sample books are stored instead. Then commands are read
    /// one line at a time until end of input:
    ///
    ///   get [--title=T] [--author=A] [--date=YYYY-MM-DD] [--order-by=title|author|date|count]
    ///   buy --id=N
    ///   restock [--id=N] [--count=N]
    Shell,
    /// Show or initialise configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print a single configuration value
    Get {
        /// Key to print (database_path, import_url, import_query, import_limit, import_timeout_secs)
        key: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = match cli.db {
        Some(db_path) => Config::load_with_db_path(db_path)?,
        None => Config::load()?,
    };
    if let Some(limit) = cli.import_limit {
        config.import_limit = limit;
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            commands::run_shell(&config, cli.offline).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config),
            ConfigAction::Get { key } => commands::config::get_config(&config, &key)?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
