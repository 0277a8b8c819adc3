use std::sync::Arc;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::classifier::train;
use crate::config::Config;
use crate::engine::RecommendationEngine;
use crate::reference::ReferenceData;

/// Process-wide state built once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub engine: RecommendationEngine,
}

impl AppContext {
    pub fn initialize(config: Config) -> Result<Self> {
        Self::with_reference(config, ReferenceData::builtin())
    }

    pub fn with_reference(config: Config, reference: ReferenceData) -> Result<Self> {
        let mut rng = match config.engine.training_seed {
            Some(seed) => {
                info!(seed, "training classifier with fixed seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        let forest = train(&reference, &config.engine.training_plan(), &mut rng)
            .context("failed to train crop classifier")?;
        let engine = RecommendationEngine::new(
            Arc::new(reference),
            Arc::new(forest),
            config.engine.prediction_draws,
        );
        Ok(Self { config, engine })
    }
}
