//! Colorgorical API integration
//!
//! One endpoint: POST `makePaletteCandidates` with the fixed palette colors in
//! CIELAB and a requested pool size. The server responds with a ranked list of
//! full candidate palettes; the ranking order is significant downstream.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for `makePaletteCandidates`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRequest {
    /// Full palette width, fixed colors plus the one being replaced
    pub palette_size: usize,
    pub num_candidates: usize,
    /// Fixed colors as [L, a, b] triples
    pub start_palette: Vec<[f64; 3]>,
    /// Lightness bounds; the wire format wants strings here
    pub lightness_range: [String; 2],
    pub hue_filters: Vec<[f64; 2]>,
}

/// One ranked candidate palette
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub palette_hex: Vec<String>,
}

/// Response from `makePaletteCandidates`
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePool {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Index where the replacement position begins in each candidate's
    /// `palette_hex`; older server builds omit it
    #[serde(rename = "numFixed")]
    pub num_fixed: Option<usize>,
}

/// Request one pool of ranked candidates from a Colorgorical server
pub async fn fetch_candidates(
    client: &Client,
    url: &str,
    request: &CandidateRequest,
) -> Result<CandidatePool, AppError> {
    tracing::debug!(
        "Requesting {} candidates around {} fixed colors",
        request.num_candidates,
        request.start_palette.len()
    );

    let response = client.post(url).json(request).send().await?;

    if !response.status().is_success() {
        return Err(AppError::ExternalApi(format!(
            "Colorgorical returned status: {}",
            response.status()
        )));
    }

    let pool: CandidatePool = response.json().await?;

    tracing::debug!("Received {} candidates", pool.candidates.len());

    Ok(pool)
}
