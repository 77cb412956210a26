//! Candidate provider port
//!
//! The selection loop only needs "give me one ranked pool of candidate
//! palettes built around these fixed colors". This trait keeps the greedy
//! logic independent of the Colorgorical transport; tests script it with
//! canned pools.

use async_trait::async_trait;
use reqwest::Client;

use crate::color::Lab;
use crate::colorgorical::{self, CandidatePool, CandidateRequest};
use crate::error::AppError;

/// Lightness bounds sent with every pool request
const LIGHTNESS_RANGE: [&str; 2] = ["25", "85"];

/// A source of ranked candidate palettes
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Fetch one ranked pool of candidate palettes built around `fixed`.
    ///
    /// Any transport or status failure is fatal to the run; there is no retry.
    async fn request_pool(
        &self,
        fixed: &[Lab],
        pool_size: usize,
    ) -> Result<CandidatePool, AppError>;
}

/// Production provider backed by a Colorgorical server
pub struct ColorgoricalProvider {
    client: Client,
    url: String,
}

impl ColorgoricalProvider {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl CandidateProvider for ColorgoricalProvider {
    async fn request_pool(
        &self,
        fixed: &[Lab],
        pool_size: usize,
    ) -> Result<CandidatePool, AppError> {
        let request = CandidateRequest {
            palette_size: fixed.len() + 1,
            num_candidates: pool_size,
            start_palette: fixed.iter().map(|lab| [lab.l, lab.a, lab.b]).collect(),
            lightness_range: [
                LIGHTNESS_RANGE[0].to_string(),
                LIGHTNESS_RANGE[1].to_string(),
            ],
            hue_filters: Vec::new(),
        };

        colorgorical::fetch_candidates(&self.client, &self.url, &request).await
    }
}
