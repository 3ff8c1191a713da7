use popcorn_models::{is_not_available, parse_rating, parse_runtime_minutes, MovieDetail, SearchResultItem};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbSearchResponse {
    #[serde(default)]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbDetailResponse {
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    poster: Option<String>,
    #[serde(default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(default)]
    plot: String,
    #[serde(default)]
    released: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

/// Poster URLs come back as "N/A" when the catalog has none
fn clean_poster(poster: Option<String>) -> Option<String> {
    poster.filter(|p| !is_not_available(p))
}

fn is_failure(response: &str) -> bool {
    response.eq_ignore_ascii_case("false")
}

/// Parse a search body into result rows
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
    let parsed: OmdbSearchResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Decode(e.to_string()))?;

    if is_failure(&parsed.response) {
        return Err(CatalogError::NotFound(
            parsed.error.unwrap_or_else(|| "Movie not found!".to_string()),
        ));
    }

    let items = parsed
        .search
        .ok_or_else(|| CatalogError::NotFound("response carried no results".to_string()))?;

    Ok(items
        .into_iter()
        .map(|item| SearchResultItem {
            catalog_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: clean_poster(item.poster),
            kind: item.kind,
        })
        .collect())
}

/// Parse a detail body; `requested_id` fills in a missing `imdbID`
pub fn parse_detail_response(body: &str, requested_id: &str) -> Result<MovieDetail, CatalogError> {
    let parsed: OmdbDetailResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Decode(e.to_string()))?;

    if is_failure(&parsed.response) {
        return Err(CatalogError::NotFound(
            parsed.error.unwrap_or_else(|| "Movie not found!".to_string()),
        ));
    }

    Ok(MovieDetail {
        catalog_id: parsed.imdb_id.unwrap_or_else(|| requested_id.to_string()),
        runtime_minutes: parse_runtime_minutes(&parsed.runtime),
        imdb_rating: parse_rating(&parsed.imdb_rating),
        title: parsed.title,
        year: parsed.year,
        poster_url: clean_poster(parsed.poster),
        runtime: parsed.runtime,
        plot: parsed.plot,
        released: parsed.released,
        actors: parsed.actors,
        director: parsed.director,
        genre: parsed.genre,
    })
}

async fn get_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, CatalogError> {
    let response = client.get(base_url).query(params).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status(status.as_u16()));
    }

    Ok(response.text().await?)
}

/// Search the catalog by free text
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResultItem>, CatalogError> {
    debug!(query, "Searching catalog");
    let body = get_body(client, base_url, &[("apikey", api_key), ("s", query)]).await?;
    let items = parse_search_response(&body)?;
    debug!(query, results = items.len(), "Catalog search returned");
    Ok(items)
}

/// Fetch the full record for one movie
pub async fn get_detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    catalog_id: &str,
) -> Result<MovieDetail, CatalogError> {
    debug!(catalog_id, "Fetching movie detail");
    let body = get_body(client, base_url, &[("apikey", api_key), ("i", catalog_id)]).await?;
    parse_detail_response(&body, catalog_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "Search": [
            {"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Type":"movie","Poster":"https://m.media-amazon.com/images/M/1.jpg"},
            {"Title":"Batman: The Killing Joke","Year":"2016","imdbID":"tt4853102","Type":"movie","Poster":"N/A"}
        ],
        "totalResults":"2",
        "Response":"True"
    }"#;

    const DETAIL_BODY: &str = r#"{
        "Title":"Batman Begins","Year":"2005","Rated":"PG-13","Released":"15 Jun 2005",
        "Runtime":"140 min","Genre":"Action, Crime, Drama","Director":"Christopher Nolan",
        "Actors":"Christian Bale, Michael Caine, Ken Watanabe",
        "Plot":"After witnessing his parents' death, Bruce learns the art of fighting.",
        "Poster":"https://m.media-amazon.com/images/M/1.jpg","imdbRating":"8.2",
        "imdbID":"tt0372784","Type":"movie","Response":"True"
    }"#;

    #[test]
    fn test_parse_search_response() {
        let items = parse_search_response(SEARCH_BODY).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].catalog_id, "tt0372784");
        assert_eq!(items[0].kind.as_deref(), Some("movie"));
        assert!(items[0].poster_url.is_some());
        assert_eq!(items[1].poster_url, None);
    }

    #[test]
    fn test_parse_search_not_found() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = parse_search_response(body).unwrap_err();
        assert_eq!(err, CatalogError::NotFound("Movie not found!".to_string()));

        let body = r#"{"Response":"False","Error":"Too many results."}"#;
        assert!(matches!(parse_search_response(body), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_parse_search_garbage() {
        assert!(matches!(parse_search_response("<html>"), Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_parse_detail_response() {
        let detail = parse_detail_response(DETAIL_BODY, "tt0372784").unwrap();
        assert_eq!(detail.title, "Batman Begins");
        assert_eq!(detail.runtime, "140 min");
        assert_eq!(detail.runtime_minutes, Some(140));
        assert_eq!(detail.imdb_rating, Some(8.2));
        assert_eq!(detail.director, "Christopher Nolan");
        assert_eq!(detail.released, "15 Jun 2005");
    }

    #[test]
    fn test_parse_detail_missing_values() {
        let body = r#"{"Title":"Obscure","Year":"1931","Runtime":"N/A","imdbRating":"N/A","Poster":"N/A","Response":"True"}"#;
        let detail = parse_detail_response(body, "tt0000001").unwrap();
        assert_eq!(detail.catalog_id, "tt0000001");
        assert_eq!(detail.runtime_minutes, None);
        assert_eq!(detail.imdb_rating, None);
        assert_eq!(detail.poster_url, None);
        assert_eq!(detail.imdb_rating_label(), "N/A");
    }

    #[test]
    fn test_parse_detail_not_found() {
        let body = r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
        let err = parse_detail_response(body, "tt0").unwrap_err();
        assert_eq!(err.user_message(), "Movie not found!");
    }
}
