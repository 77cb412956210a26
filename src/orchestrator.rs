//! Run selection across every palette position and assemble the output map

use std::collections::BTreeMap;

use crate::error::AppError;
use crate::palette::Palette;
use crate::provider::CandidateProvider;
use crate::selector::{GreedySelector, SelectorConfig};

/// paletteId -> selectedIndex (as string) -> survivor hex strings
pub type ResultMap = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Resolve every (palette, position) task, strictly one at a time.
///
/// The map only comes back complete: the first failed task aborts the whole
/// run, so callers never see (or persist) a partial result.
pub async fn run(
    palettes: &[Palette],
    provider: &dyn CandidateProvider,
    config: SelectorConfig,
) -> Result<ResultMap, AppError> {
    let selector = GreedySelector::new(provider, config);
    let total: usize = palettes.iter().map(|p| p.colors.len()).sum();
    let mut done = 0;
    let mut results = ResultMap::new();

    for palette in palettes {
        for task in palette.tasks() {
            done += 1;
            tracing::info!(
                "[{done}/{total}] palette {}, idx {}",
                task.palette_id,
                task.selected_index
            );

            let survivors = selector.select(&task).await?;
            results
                .entry(task.palette_id.clone())
                .or_default()
                .insert(
                    task.selected_index.to_string(),
                    survivors.iter().map(|c| c.to_hex()).collect(),
                );
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::color::{Lab, Rgb};
    use crate::colorgorical::{Candidate, CandidatePool};
    use crate::sector::SectorThresholds;

    /// Returns the same replacement colors for every request, echoing the
    /// fixed-color count it was given
    struct RepeatProvider {
        replacements: Vec<&'static str>,
        calls: AtomicUsize,
        fail_after: Option<usize>,
    }

    impl RepeatProvider {
        fn new(replacements: Vec<&'static str>) -> Self {
            Self {
                replacements,
                calls: AtomicUsize::new(0),
                fail_after: None,
            }
        }
    }

    #[async_trait]
    impl CandidateProvider for RepeatProvider {
        async fn request_pool(
            &self,
            fixed: &[Lab],
            _pool_size: usize,
        ) -> Result<CandidatePool, AppError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(limit) = self.fail_after {
                if call >= limit {
                    return Err(AppError::ExternalApi("boom".to_string()));
                }
            }
            let padding = vec!["#000000".to_string(); fixed.len()];
            Ok(CandidatePool {
                candidates: self
                    .replacements
                    .iter()
                    .map(|hex| {
                        let mut palette_hex = padding.clone();
                        palette_hex.push((*hex).to_string());
                        Candidate { palette_hex }
                    })
                    .collect(),
                num_fixed: Some(fixed.len()),
            })
        }
    }

    fn rgb_palette(id: &str) -> Palette {
        Palette {
            id: id.to_string(),
            colors: vec![
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255),
            ],
        }
    }

    fn config(target: usize) -> SelectorConfig {
        SelectorConfig {
            thresholds: SectorThresholds::default(),
            target,
            max_loops: 2,
            pool_size: 10,
        }
    }

    #[tokio::test]
    async fn assembles_full_result_map() {
        // Both replacements are far from red, green, and blue alike
        let provider = RepeatProvider::new(vec!["#cc2222", "#886644"]);
        let palettes = vec![rgb_palette("1"), rgb_palette("2")];

        let results = run(&palettes, &provider, config(2)).await.unwrap();

        assert_eq!(results.len(), 2);
        for palette_id in ["1", "2"] {
            let by_index = &results[palette_id];
            assert_eq!(by_index.len(), 3);
            for idx in ["0", "1", "2"] {
                assert_eq!(by_index[idx], vec!["#cc2222", "#886644"]);
            }
        }
    }

    #[tokio::test]
    async fn result_map_serializes_to_expected_shape() {
        let provider = RepeatProvider::new(vec!["#cc2222"]);
        let palettes = vec![rgb_palette("7")];

        let results = run(&palettes, &provider, config(1)).await.unwrap();
        let value = serde_json::to_value(&results).unwrap();

        assert_eq!(value["7"]["0"][0], "#cc2222");
        assert_eq!(value["7"]["2"][0], "#cc2222");
    }

    #[tokio::test]
    async fn first_failure_aborts_the_run() {
        let mut provider = RepeatProvider::new(vec!["#cc2222", "#886644"]);
        // First task resolves in one call, the second task's call fails
        provider.fail_after = Some(1);
        let palettes = vec![rgb_palette("1")];

        let err = run(&palettes, &provider, config(2)).await.unwrap_err();
        match err {
            AppError::ProviderUnavailable {
                palette_id,
                selected_index,
                ..
            } => {
                assert_eq!(palette_id, "1");
                assert_eq!(selected_index, 1);
            }
            other => panic!("expected ProviderUnavailable, got {other}"),
        }
    }
}
