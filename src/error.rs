//! Error types for the application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed hex color: {0:?}")]
    MalformedColor(String),

    #[error(
        "Candidate provider unavailable for palette {palette_id} idx {selected_index} \
         (loop {loop_index}): {reason}"
    )]
    ProviderUnavailable {
        palette_id: String,
        selected_index: usize,
        loop_index: usize,
        reason: String,
    },

    #[error(
        "Only got {found}/{target} survivors for palette {palette_id} idx {selected_index} \
         with deltaH={delta_h}, deltaR={delta_r}. \
         Try increasing --pool-per-loop and/or --max-loops"
    )]
    InsufficientSurvivors {
        palette_id: String,
        selected_index: usize,
        found: usize,
        target: usize,
        delta_h: f64,
        delta_r: f64,
    },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
