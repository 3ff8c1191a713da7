use super::prompts;
use crate::output::{styled_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager, API_KEY_ENV, DEFAULT_API_KEY};
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, paths, output),
        crate::ConfigCommands::Set { key, value } => set_config(&key, &value, paths, output),
        crate::ConfigCommands::Init => init_config(paths, output),
    }
}

fn show_config(full: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let config = Config::load_or_default(paths).map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    if !config_file.exists() {
        output.warn(format!(
            "No configuration file at {}; showing defaults. Run 'popcorn config init' to create one.",
            config_file.display()
        ));
    }

    let api_key = if full { config.catalog.api_key.clone() } else { config.masked_api_key() };
    let watched_file = config.watched_file(paths);

    let mut table = styled_table(["Setting", "Value"]);
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("catalog.api_key", api_key.clone()),
        ("catalog.base_url", config.catalog.base_url.clone()),
        ("search.debounce_ms", config.search.debounce_ms.to_string()),
        ("search.min_query_len", config.search.min_query_len.to_string()),
        ("Watched list", watched_file.display().to_string()),
        ("Log directory", paths.log_dir().display().to_string()),
    ];
    for (key, value) in rows {
        table.add_row(vec![key.to_string(), value]);
    }

    output.table_or_json(
        table,
        &json!({
            "configFile": config_file,
            "catalog": { "apiKey": api_key, "baseUrl": config.catalog.base_url },
            "search": { "debounceMs": config.search.debounce_ms, "minQueryLen": config.search.min_query_len },
            "watchedFile": watched_file,
        }),
    );
    Ok(())
}

fn set_config(key: &str, value: &str, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let mut config = if config_file.exists() {
        Config::load_from_file(&config_file).map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?
    } else {
        Config::default()
    };

    config.set_value(key, value)?;
    config.validate()?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Set {} in {}", key, config_file.display()));
    Ok(())
}

fn init_config(paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !prompts::prompt_yes_no(&format!("{} exists. Overwrite?", config_file.display()), Some(false))? {
        output.info("Keeping the existing configuration.");
        return Ok(());
    }

    output.info(format!(
        "Get a free OMDb API key at https://www.omdbapi.com/apikey.aspx (or set {}).",
        API_KEY_ENV
    ));

    let mut config = Config::default();
    let api_key = prompts::prompt_string("OMDb API key", Some(DEFAULT_API_KEY))?;
    config.catalog.api_key = api_key.trim().to_string();
    config.search.debounce_ms = prompts::prompt_number("Search delay (ms)", config.search.debounce_ms)?;
    config.validate()?;

    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Configuration saved to {}", config_file.display()));
    Ok(())
}
