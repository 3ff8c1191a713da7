use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, search, show, watched};
use popcorn_config::PathManager;

mod commands;
mod logging;
mod output;
mod tui;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "usePopcorn - search movies, rate them and keep a watched list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive movie browser (default)
    #[command(long_about = "Open the interactive browser: type to search, pick a movie to see its details, rate it and add it to your watched list. Logs go to the popcorn log directory while the browser is open.")]
    Browse,

    /// Search the catalog once and print the results
    Search {
        /// Movie title to search for
        query: String,
    },

    /// Show full details for one movie
    Show {
        /// Catalog (IMDb) id, e.g. tt0372784
        id: String,
    },

    /// Manage the watched list
    Watched {
        #[command(subcommand)]
        cmd: WatchedCommands,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WatchedCommands {
    /// List watched movies in the order they were added
    List,

    /// Averages and total runtime
    Summary,

    /// Look a movie up and add it with your rating
    Add {
        /// Catalog (IMDb) id
        id: String,

        /// Your rating, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },

    /// Remove a movie from the list
    Remove {
        /// Catalog (IMDb) id
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the full API key
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Set a single value, e.g. `popcorn config set search.debounce_ms 300`
    #[command(long_about = "Set a single configuration value. Keys: catalog.api_key, catalog.base_url, search.debounce_ms, search.min_query_len, storage.watched_file (empty value resets it).")]
    Set {
        key: String,
        value: String,
    },

    /// Interactive setup
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::new().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let command = cli.command.unwrap_or(Commands::Browse);

    // The browser owns the screen, so it logs to a file instead of stderr
    match command {
        Commands::Browse => logging::init_file_logging(cli.verbose, cli.quiet, &paths.ui_log_file()),
        _ => logging::init_logging(cli.verbose, cli.quiet),
    }
    .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match command {
        Commands::Browse => {
            let config = commands::load_config(&paths)?;
            browse::run_browse(&config, &paths).await
        }
        Commands::Search { query } => {
            let config = commands::load_config(&paths)?;
            search::run_search(&query, &config, &output).await
        }
        Commands::Show { id } => {
            let config = commands::load_config(&paths)?;
            show::run_show(&id, &config, &paths, &output).await
        }
        Commands::Watched { cmd } => {
            let config = commands::load_config(&paths)?;
            watched::run_watched(cmd, &config, &paths, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, &paths, &output),
    };

    // Scripts reading JSON get the failure as a JSON message too
    if let Err(report) = &result {
        if !output.is_human() {
            output.error(report.to_string());
            std::process::exit(1);
        }
    }
    result
}
