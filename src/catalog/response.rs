//! Catalog wire types and their conversion into domain models.
//!
//! OMDb reports every field as a string and marks absent values with `"N/A"`.
//! Logical failures come back as HTTP 200 with `"Response": "False"`.

use crate::domain::{CatalogError, ItemDetail, SearchResultItem};
use serde::Deserialize;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Search", default)]
    search: Option<Vec<RawSearchItem>>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDetail {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

fn is_false_response(response: Option<&str>) -> bool {
    response.is_some_and(|r| r.trim().eq_ignore_ascii_case("false"))
}

fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != NOT_AVAILABLE
    })
}

fn check_status(status: u16) -> Result<(), CatalogError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(CatalogError::NetworkFailure { status })
    }
}

/// Parses `"148 min"` into minutes.
fn parse_runtime(raw: Option<String>) -> Option<u32> {
    available(raw).and_then(|r| r.split_whitespace().next().and_then(|n| n.parse().ok()))
}

fn parse_rating(raw: Option<String>) -> Option<f64> {
    available(raw)
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())
}

/// Decodes a search response into result rows.
///
/// # Errors
///
/// - [`CatalogError::NetworkFailure`] for a non-2xx status
/// - [`CatalogError::Malformed`] if the body is not a catalog response
/// - [`CatalogError::NotFound`] for `"Response": "False"` or a missing `Search`
pub fn parse_search(status: u16, body: &[u8]) -> Result<Vec<SearchResultItem>, CatalogError> {
    check_status(status)?;

    let raw: RawSearchResponse =
        serde_json::from_slice(body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    if is_false_response(raw.response.as_deref()) {
        tracing::debug!(error = ?raw.error, "catalog search returned no match");
        return Err(CatalogError::NotFound);
    }

    let items = raw.search.ok_or(CatalogError::NotFound)?;

    Ok(items
        .into_iter()
        .map(|item| SearchResultItem {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: available(item.poster),
        })
        .collect())
}

/// Decodes a detail response.
///
/// # Errors
///
/// Same taxonomy as [`parse_search`]; a body without `imdbID` or `Title` is
/// reported as [`CatalogError::NotFound`].
pub fn parse_detail(status: u16, body: &[u8]) -> Result<ItemDetail, CatalogError> {
    check_status(status)?;

    let raw: RawDetail =
        serde_json::from_slice(body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    if is_false_response(raw.response.as_deref()) {
        tracing::debug!(error = ?raw.error, "catalog detail returned no match");
        return Err(CatalogError::NotFound);
    }

    let (Some(id), Some(title)) = (raw.imdb_id, raw.title) else {
        return Err(CatalogError::NotFound);
    };

    Ok(ItemDetail {
        id,
        title,
        year: raw.year,
        poster_url: available(raw.poster),
        runtime_minutes: parse_runtime(raw.runtime),
        catalog_rating: parse_rating(raw.imdb_rating),
        plot: raw.plot,
        release_date: raw.released,
        cast: raw.actors,
        director: raw.director,
        genre: raw.genre,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATMAN: &str = r#"{
        "Search": [
            {"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Type":"movie","Poster":"https://img/bb.jpg"},
            {"Title":"The Batman","Year":"2022","imdbID":"tt1877830","Type":"movie","Poster":"N/A"}
        ],
        "totalResults":"2",
        "Response":"True"
    }"#;

    const INCEPTION: &str = r#"{
        "Title":"Inception","Year":"2010","Released":"16 Jul 2010","Runtime":"148 min",
        "Genre":"Action, Adventure, Sci-Fi","Director":"Christopher Nolan",
        "Actors":"Leonardo DiCaprio, Joseph Gordon-Levitt","Plot":"A thief who steals secrets.",
        "Poster":"https://img/inception.jpg","imdbRating":"8.8","imdbID":"tt1375666","Response":"True"
    }"#;

    #[test]
    fn search_rows_keep_catalog_order() {
        let items = parse_search(200, BATMAN.as_bytes()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "tt0372784");
        assert_eq!(items[0].poster_url.as_deref(), Some("https://img/bb.jpg"));
        assert_eq!(items[1].title, "The Batman");
        assert_eq!(items[1].poster_url, None);
    }

    #[test]
    fn false_response_is_not_found() {
        let body = br#"{"Response":"False","Error":"Movie not found!"}"#;
        assert_eq!(parse_search(200, body), Err(CatalogError::NotFound));
        assert_eq!(parse_detail(200, br#"{"Response":"False","Error":"Incorrect IMDb ID."}"#).unwrap_err(), CatalogError::NotFound);
    }

    #[test]
    fn missing_search_collection_is_not_found() {
        assert_eq!(parse_search(200, br#"{"Response":"True"}"#), Err(CatalogError::NotFound));
    }

    #[test]
    fn non_success_status_is_network_failure() {
        assert_eq!(
            parse_search(503, BATMAN.as_bytes()),
            Err(CatalogError::NetworkFailure { status: 503 })
        );
        assert_eq!(
            parse_detail(401, b"").unwrap_err(),
            CatalogError::NetworkFailure { status: 401 }
        );
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(parse_search(200, b"<html>"), Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn detail_fields_are_converted() {
        let detail = parse_detail(200, INCEPTION.as_bytes()).unwrap();

        assert_eq!(detail.id, "tt1375666");
        assert_eq!(detail.runtime_minutes, Some(148));
        assert_eq!(detail.catalog_rating, Some(8.8));
        assert_eq!(detail.director, "Christopher Nolan");
        assert_eq!(detail.release_date, "16 Jul 2010");
    }

    #[test]
    fn not_available_detail_values_become_none() {
        let body = br#"{"Title":"Obscure","Year":"1999","imdbID":"tt0000001","Runtime":"N/A","imdbRating":"N/A","Poster":"N/A","Response":"True"}"#;
        let detail = parse_detail(200, body).unwrap();

        assert_eq!(detail.runtime_minutes, None);
        assert_eq!(detail.catalog_rating, None);
        assert_eq!(detail.poster_url, None);
        assert!(detail.plot.is_empty());
    }
}
