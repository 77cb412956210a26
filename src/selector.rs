//! Greedy survivor selection
//!
//! Accumulates candidate pools from the provider until `target` colors survive
//! the sector filters, or the loop budget runs out. Candidates are consumed
//! strictly in provider-ranked order and the first fit wins; reordering them
//! would change which colors get accepted, so don't.

use std::collections::HashSet;

use crate::color::{Lab, Lch, Rgb};
use crate::error::AppError;
use crate::palette::SelectionTask;
use crate::provider::CandidateProvider;
use crate::sector::{in_sector, SectorThresholds};

/// Selection knobs for one run
#[derive(Debug, Clone, Copy)]
pub struct SelectorConfig {
    pub thresholds: SectorThresholds,
    /// Survivors to accumulate per task
    pub target: usize,
    /// Provider calls allowed per task
    pub max_loops: usize,
    /// Candidates requested per provider call
    pub pool_size: usize,
}

pub struct GreedySelector<'a> {
    provider: &'a dyn CandidateProvider,
    config: SelectorConfig,
}

impl<'a> GreedySelector<'a> {
    pub fn new(provider: &'a dyn CandidateProvider, config: SelectorConfig) -> Self {
        Self { provider, config }
    }

    /// Run the accumulation loop for one task.
    ///
    /// Returns exactly `target` survivors or fails; never a shorter list.
    pub async fn select(&self, task: &SelectionTask) -> Result<Vec<Rgb>, AppError> {
        let original_lch = task.original.to_lch();
        let fixed_lab: Vec<Lab> = task.fixed.iter().map(|c| c.to_lab()).collect();

        let mut survivors: Vec<Rgb> = Vec::new();
        let mut survivors_lch: Vec<Lch> = Vec::new();
        // Dedupes across every loop of this task; never shared between tasks
        let mut seen: HashSet<String> = HashSet::new();

        for loop_index in 1..=self.config.max_loops {
            let pool = self
                .provider
                .request_pool(&fixed_lab, self.config.pool_size)
                .await
                .map_err(|e| AppError::ProviderUnavailable {
                    palette_id: task.palette_id.clone(),
                    selected_index: task.selected_index,
                    loop_index,
                    reason: e.to_string(),
                })?;

            let num_fixed = pool.num_fixed.unwrap_or(fixed_lab.len());

            for candidate in &pool.candidates {
                // The replacement color sits right after the echoed fixed ones
                let Some(hex) = candidate.palette_hex.get(num_fixed) else {
                    continue;
                };
                let color = Rgb::from_hex(hex)?;
                if !seen.insert(color.to_hex().to_uppercase()) {
                    continue;
                }
                if color == task.original {
                    continue;
                }

                let lch = color.to_lch();
                if in_sector(original_lch, lch, self.config.thresholds) {
                    continue;
                }
                if survivors_lch
                    .iter()
                    .any(|s| in_sector(*s, lch, self.config.thresholds))
                {
                    continue;
                }

                survivors.push(color);
                survivors_lch.push(lch);
                if survivors.len() == self.config.target {
                    break;
                }
            }

            if survivors.len() == self.config.target {
                tracing::debug!(
                    "Palette {} idx {} satisfied after loop {loop_index}",
                    task.palette_id,
                    task.selected_index
                );
                return Ok(survivors);
            }
        }

        Err(AppError::InsufficientSurvivors {
            palette_id: task.palette_id.clone(),
            selected_index: task.selected_index,
            found: survivors.len(),
            target: self.config.target,
            delta_h: self.config.thresholds.delta_h,
            delta_r: self.config.thresholds.delta_r,
        })
    }
}
