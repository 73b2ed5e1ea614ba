use anyhow::{Context, Result};
use bookstock_core::schema::Database;
use bookstock_core::CatalogStore;
use bookstock_import::{populate, Config, OpenLibraryClient};
use std::io;

use crate::shell::Shell;

/// Open the catalog, make sure it has books, then hand over to the shell.
pub async fn run_shell(config: &Config, offline: bool) -> Result<()> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("Failed to open database")?;
    log::info!("Using catalog at {}", config.database_path.display());

    let importer = if offline {
        None
    } else {
        Some(
            OpenLibraryClient::new(
                config.import_url.clone(),
                config.import_query.clone(),
                config.import_timeout(),
            )
            .context("Failed to create HTTP client")?,
        )
    };

    if importer.is_some() && db.is_empty()? {
        println!("Trying to get books online. Please wait ...");
    }

    let populated = populate(&db, importer.as_ref(), config.import_limit)
        .await
        .context("Failed to populate catalog")?;
    println!("{populated}");

    // Stdin reads block, so the shell runs on the blocking pool.
    let handled = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        Shell::new(&db, rand::thread_rng(), stdin.lock(), io::stdout()).run()
    })
    .await
    .context("Shell task failed")?
    .context("Failed to read command")?;
    log::info!("End of input after {} commands", handled);

    Ok(())
}
