use super::spinner::Spinner;
use crate::output::{styled_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_models::MovieDetail;
use popcorn_sources::{CatalogSource, OmdbClient};
use serde_json::json;
use tracing::warn;

pub async fn run_show(catalog_id: &str, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let client = OmdbClient::from_config(&config.catalog);
    let spinner = Spinner::start(format!("Loading {}...", catalog_id), output.is_human());
    let outcome = client.movie_detail(catalog_id).await;
    spinner.finish();

    let detail = outcome.map_err(|e| {
        warn!(catalog_id, error = %e, "Detail lookup failed");
        eyre!("{}", e.user_message())
    })?;

    let watched = super::open_watched_list(config, paths);
    let user_rating = watched.user_rating_for(&detail.catalog_id);

    output.table_or_json(
        detail_table(&detail, user_rating),
        &json!({ "detail": detail, "userRating": user_rating }),
    );
    Ok(())
}

fn detail_table(detail: &MovieDetail, user_rating: Option<u8>) -> comfy_table::Table {
    let mut table = styled_table([detail.title.as_str(), ""]);
    let rows = [
        ("Released", detail.released.clone()),
        ("Runtime", detail.runtime.clone()),
        ("Genre", detail.genre.clone()),
        ("IMDb rating", format!("⭐ {}", detail.imdb_rating_label())),
        ("Plot", detail.plot.clone()),
        ("Starring", detail.actors.clone()),
        ("Directed by", detail.director.clone()),
        ("Poster", detail.poster_or_placeholder().to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    if let Some(rating) = user_rating {
        table.add_row(vec!["You rated".to_string(), format!("{} ⭐", rating)]);
    }
    table
}
