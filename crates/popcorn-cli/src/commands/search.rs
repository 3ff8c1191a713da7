use super::spinner::Spinner;
use crate::output::{styled_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::Config;
use popcorn_models::SearchResultItem;
use popcorn_sources::{CatalogSource, OmdbClient};
use serde_json::json;
use tracing::warn;

pub async fn run_search(query: &str, config: &Config, output: &Output) -> Result<()> {
    let query = query.trim();
    let floor = config.search.min_query_len;
    if query.chars().count() < floor {
        output.warn(format!("Type at least {} characters to search", floor));
        return Ok(());
    }

    let client = OmdbClient::from_config(&config.catalog);
    let spinner = Spinner::start(format!("Searching for \"{}\"...", query), output.is_human());
    let outcome = client.search(query).await;
    spinner.finish();

    let items = outcome.map_err(|e| {
        warn!(query, error = %e, "Search failed");
        eyre!("{}", e.user_message())
    })?;

    output.table_or_json(results_table(&items), &json!(items));
    Ok(())
}

fn results_table(items: &[SearchResultItem]) -> comfy_table::Table {
    let mut table = styled_table(["ID", "Title", "Year", "Type"]);
    for item in items {
        table.add_row(vec![
            item.catalog_id.clone(),
            item.title.clone(),
            item.year.clone(),
            item.kind.clone().unwrap_or_default(),
        ]);
    }
    table
}
