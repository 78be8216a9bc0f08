use std::{sync::LazyLock, time::Duration};

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::info;

use super::{
    provider::SymbolListProvider,
    utils::{build_client, make_text_request},
};
use crate::{error::FetchError, models::Universe};

const CONSTITUENTS_TABLE_ID: &str = "constituents";

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table\b[^>]*\bid\s*=\s*"([^"]+)"[^>]*>(.*?)</table>"#)
        .expect("table pattern is valid")
});
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").expect("row pattern is valid"));
static CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(th|td)\b[^>]*>(.*?)</(?:th|td)>").expect("cell pattern is valid")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

/// Index membership scraped from Wikipedia constituent tables.
#[derive(Clone, Debug)]
pub struct WikipediaApi {
    client: Client,
    base_url: String,
}

impl WikipediaApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl SymbolListProvider for WikipediaApi {
    async fn list_symbols(&self, universe: Universe) -> Result<Vec<String>, FetchError> {
        let html = make_text_request(
            &self.client,
            &self.base_url,
            universe.wiki_page(),
            &universe.to_string(),
        )
        .await?;
        let symbols = parse_constituents(&html, universe.symbol_column())?;
        info!("Fetched {} symbols for {} from Wikipedia", symbols.len(), universe);
        Ok(symbols)
    }
}

struct Cell {
    is_header: bool,
    text: String,
}

/// Extracts the `column` values of the `constituents` table in `html`.
///
/// The column is located by its header text, so reordering columns is
/// tolerated; a missing table or column is reported as a format change.
pub fn parse_constituents(html: &str, column: &str) -> Result<Vec<String>, FetchError> {
    let table = TABLE_RE
        .captures_iter(html)
        .find(|caps| &caps[1] == CONSTITUENTS_TABLE_ID)
        .map(|caps| caps[2].to_string())
        .ok_or_else(|| {
            FetchError::UpstreamFormatChange(format!(
                "table with id '{}' not found",
                CONSTITUENTS_TABLE_ID
            ))
        })?;

    let mut rows = ROW_RE.captures_iter(&table).map(|row| parse_cells(&row[1]));

    let header = rows
        .find(|cells| !cells.is_empty() && cells.iter().all(|c| c.is_header))
        .ok_or_else(|| FetchError::UpstreamFormatChange("header row not found".to_string()))?;

    let column_idx = header
        .iter()
        .position(|cell| cell.text.eq_ignore_ascii_case(column))
        .ok_or_else(|| {
            FetchError::UpstreamFormatChange(format!("column '{}' not found", column))
        })?;

    let symbols: Vec<String> = rows
        .filter_map(|cells| cells.into_iter().nth(column_idx))
        .map(|cell| cell.text)
        .filter(|text| !text.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(FetchError::UpstreamFormatChange(format!(
            "no rows in column '{}'",
            column
        )));
    }

    Ok(symbols)
}

fn parse_cells(row: &str) -> Vec<Cell> {
    CELL_RE
        .captures_iter(row)
        .map(|caps| Cell {
            is_header: caps[1].eq_ignore_ascii_case("th"),
            text: cell_text(&caps[2]),
        })
        .collect()
}

fn cell_text(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, "");
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
