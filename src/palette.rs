//! Reference palette input records
//!
//! Palettes arrive as the `palettes.json` array written by the upstream CSV
//! ingestion step: one record per palette with an id, ordered hex colors, and
//! free-form metadata this tool carries along but never interprets.

use std::path::Path;

use serde::Deserialize;

use crate::color::Rgb;
use crate::error::AppError;

/// Raw palette record as found in `palettes.json`
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteRecord {
    pub palette_id: String,
    pub colors: Vec<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// A validated palette: id plus its ordered colors
#[derive(Debug, Clone)]
pub struct Palette {
    pub id: String,
    pub colors: Vec<Rgb>,
}

impl Palette {
    /// Validate a raw record, rejecting malformed hex up front
    pub fn from_record(record: &PaletteRecord) -> Result<Self, AppError> {
        let colors = record
            .colors
            .iter()
            .map(|hex| Rgb::from_hex(hex))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: record.palette_id.clone(),
            colors,
        })
    }

    /// One selection task per color position, in palette order
    pub fn tasks(&self) -> Vec<SelectionTask> {
        (0..self.colors.len())
            .map(|idx| SelectionTask {
                palette_id: self.id.clone(),
                selected_index: idx,
                original: self.colors[idx],
                fixed: self
                    .colors
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, c)| *c)
                    .collect(),
            })
            .collect()
    }
}

/// One (palette, position) unit of work: replace `original`, keep `fixed`
#[derive(Debug, Clone)]
pub struct SelectionTask {
    pub palette_id: String,
    pub selected_index: usize,
    /// The color being replaced
    pub original: Rgb,
    /// The other palette colors, order-preserved
    pub fixed: Vec<Rgb>,
}

/// Load and validate every palette from a `palettes.json` file
pub fn load_palettes(path: &Path) -> Result<Vec<Palette>, AppError> {
    let data = std::fs::read_to_string(path)?;
    let records: Vec<PaletteRecord> = serde_json::from_str(&data)?;
    records.iter().map(Palette::from_record).collect()
}
