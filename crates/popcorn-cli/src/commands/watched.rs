use super::spinner::Spinner;
use crate::output::{styled_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{convert_decimal, runtime_postfix, WatchedSummary};
use popcorn_models::WatchedEntry;
use popcorn_sources::{CatalogSource, OmdbClient};
use serde_json::json;

pub async fn run_watched(cmd: crate::WatchedCommands, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        crate::WatchedCommands::List => list(config, paths, output),
        crate::WatchedCommands::Summary => summary(config, paths, output),
        crate::WatchedCommands::Add { id, rating } => add(&id, rating, config, paths, output).await,
        crate::WatchedCommands::Remove { id } => remove(&id, config, paths, output),
    }
}

fn list(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let model = super::open_watched_list(config, paths);
    if model.is_empty() && output.is_human() {
        output.info("No movies on the watched list yet.");
        return Ok(());
    }
    output.table_or_json(entries_table(model.entries()), &json!(model.entries()));
    Ok(())
}

fn summary(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let model = super::open_watched_list(config, paths);
    let summary = model.summary();
    output.table_or_json(summary_table(&summary), &summary_json(&summary));
    Ok(())
}

async fn add(catalog_id: &str, rating: u8, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut model = super::open_watched_list(config, paths);
    if model.contains(catalog_id) {
        output.warn(format!("{} is already on the watched list", catalog_id));
        return Ok(());
    }

    let client = OmdbClient::from_config(&config.catalog);
    let spinner = Spinner::start(format!("Loading {}...", catalog_id), output.is_human());
    let outcome = client.movie_detail(catalog_id).await;
    spinner.finish();
    let detail = outcome.map_err(|e| eyre!("{}", e.user_message()))?;

    let entry = WatchedEntry::from_detail(&detail, rating);
    let title = entry.title.clone();
    model.add(entry)?;
    output.success(format!("Added {} ({} ⭐)", title, rating));
    Ok(())
}

fn remove(catalog_id: &str, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut model = super::open_watched_list(config, paths);
    let title = model.get(catalog_id).map(|e| e.title.clone());
    let removed = model.remove(catalog_id);

    match (removed, title) {
        (0, _) | (_, None) => output.warn(format!("{} was not on the watched list", catalog_id)),
        (_, Some(title)) => output.success(format!("Removed {}", title)),
    }
    Ok(())
}

fn entries_table(entries: &[WatchedEntry]) -> comfy_table::Table {
    let mut table = styled_table(["ID", "Title", "IMDb", "Yours", "Runtime"]);
    for entry in entries {
        table.add_row(vec![
            entry.catalog_id.clone(),
            entry.title.clone(),
            entry.imdb_rating.map(convert_decimal).unwrap_or_else(|| "N/A".to_string()),
            entry.user_rating.to_string(),
            format!("{} min", entry.runtime_minutes.unwrap_or(0)),
        ]);
    }
    table
}

fn summary_table(summary: &WatchedSummary) -> comfy_table::Table {
    let mut table = styled_table(["Movies you watched", ""]);
    table.add_row(vec!["#️⃣ Movies".to_string(), summary.count.to_string()]);
    table.add_row(vec!["⭐️ IMDb average".to_string(), convert_decimal(summary.avg_imdb_rating)]);
    table.add_row(vec!["🌟 Your average".to_string(), convert_decimal(summary.avg_user_rating)]);
    table.add_row(vec!["⏳ Total runtime".to_string(), runtime_postfix(summary.total_runtime_minutes)]);
    table
}

fn summary_json(summary: &WatchedSummary) -> serde_json::Value {
    json!({
        "count": summary.count,
        "avgImdbRating": summary.avg_imdb_rating,
        "avgUserRating": summary.avg_user_rating,
        "totalRuntimeMinutes": summary.total_runtime_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table_formats_values() {
        let summary = WatchedSummary {
            count: 2,
            avg_imdb_rating: 7.25,
            avg_user_rating: 8.0,
            total_runtime_minutes: 150,
        };
        let rendered = summary_table(&summary).to_string();
        assert!(rendered.contains("7.25"));
        assert!(rendered.contains("2.50 hrs"));

        let value = summary_json(&summary);
        assert_eq!(value["totalRuntimeMinutes"], 150);
        assert_eq!(value["count"], 2);
    }

    #[test]
    fn test_entries_table_marks_missing_values() {
        let entry = WatchedEntry {
            catalog_id: "tt1".to_string(),
            title: "Unknown".to_string(),
            year: "1999".to_string(),
            poster_url: None,
            imdb_rating: None,
            runtime_minutes: None,
            user_rating: 6,
            added_at: None,
        };
        let rendered = entries_table(&[entry]).to_string();
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("0 min"));
    }
}
