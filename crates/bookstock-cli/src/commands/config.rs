use anyhow::Result;
use bookstock_import::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  database_path: {}", config.database_path.display());
    println!("  import_url: {}", config.import_url);
    println!("  import_query: {}", config.import_query);
    println!("  import_limit: {}", config.import_limit);
    println!("  import_timeout_secs: {}", config.import_timeout_secs);

    println!("\nPriority: CLI args > ENV vars (BOOKSTOCK_*) > Config file > Defaults");
}

/// Get a specific config value.
pub fn get_config(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "database_path" => config.database_path.display().to_string(),
        "import_url" => config.import_url.clone(),
        "import_query" => config.import_query.clone(),
        "import_limit" => config.import_limit.to_string(),
        "import_timeout_secs" => config.import_timeout_secs.to_string(),
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: database_path, import_url, import_query, import_limit, import_timeout_secs",
                key
            );
        }
    };
    println!("{}", value);
    Ok(())
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure bookstock.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
