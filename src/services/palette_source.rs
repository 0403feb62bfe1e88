//! Palette sources: embedded JSON, JSON files and published spreadsheets.
//!
//! A spreadsheet page lists one color per `<tr>`, with the name and the
//! R, G, B channels in the `td.s6` / `td.s8` cells of that row. Rows whose
//! channels are not valid 0-255 integers (headers, notes, blank lines) are
//! skipped.

use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;

use crate::assets::{AssetLoader, DEFAULT_PALETTE};
use crate::error::PaletteSourceError;
use crate::models::{ColorRecord, PaletteSourceConfig};

/// Timeout for spreadsheet requests
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads palette records from the configured source
pub struct PaletteSource {
    config: PaletteSourceConfig,
    assets: Arc<AssetLoader>,
    client: reqwest::Client,
}

impl PaletteSource {
    pub fn new(
        config: PaletteSourceConfig,
        assets: Arc<AssetLoader>,
    ) -> Result<Self, PaletteSourceError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            config,
            assets,
            client,
        })
    }

    pub fn config(&self) -> &PaletteSourceConfig {
        &self.config
    }

    /// Load all records from the source
    pub async fn fetch(&self) -> Result<Vec<ColorRecord>, PaletteSourceError> {
        match &self.config {
            PaletteSourceConfig::Embedded => {
                let data = self
                    .assets
                    .default_palette()
                    .ok_or(PaletteSourceError::MissingAsset(DEFAULT_PALETTE))?;
                parse_palette_json(&data)
            }
            PaletteSourceConfig::File { path } => {
                let data = tokio::fs::read(path)
                    .await
                    .map_err(|source| PaletteSourceError::Io {
                        path: path.display().to_string(),
                        source,
                    })?;
                parse_palette_json(&data)
            }
            PaletteSourceConfig::Spreadsheet { url } => {
                tracing::debug!(url = %url, "Fetching palette spreadsheet");
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(PaletteSourceError::Status {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                let html = response.text().await?;
                parse_spreadsheet_html(&html)
            }
        }
    }
}

/// Parse a JSON array of `{name, r, g, b}` records
pub fn parse_palette_json(data: &[u8]) -> Result<Vec<ColorRecord>, PaletteSourceError> {
    Ok(serde_json::from_slice(data)?)
}

fn selector(css: &str) -> Result<Selector, PaletteSourceError> {
    Selector::parse(css).map_err(|e| PaletteSourceError::Selector(format!("{css}: {e:?}")))
}

/// Extract color records from published spreadsheet HTML
pub fn parse_spreadsheet_html(html: &str) -> Result<Vec<ColorRecord>, PaletteSourceError> {
    let rows = selector("tr")?;
    let cells = selector("td.s6, td.s8")?;
    let doc = Html::parse_document(html);

    let mut records = Vec::new();
    for (row, tr) in doc.select(&rows).enumerate() {
        let texts: Vec<String> = tr
            .select(&cells)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        if texts.len() < 4 {
            continue;
        }

        match (
            texts[1].parse::<u8>(),
            texts[2].parse::<u8>(),
            texts[3].parse::<u8>(),
        ) {
            (Ok(r), Ok(g), Ok(b)) => records.push(ColorRecord::new(texts[0].clone(), r, g, b)),
            _ => tracing::debug!(row, cells = ?texts, "Skipping row without valid channels"),
        }
    }

    tracing::debug!(colors = records.len(), "Parsed palette spreadsheet");
    Ok(records)
}
