//! Builds an [`Engine`] for this process: loads `EngineConfig` from the
//! environment, picks an embedding provider from `CliConfig`, and
//! registers the reference game family. Mirrors the split between the
//! teacher's env-driven `AppConfig::load()` and its kernel wiring step,
//! minus the axum listener -- this binary never serves HTTP.

use std::sync::Arc;

use anyhow::{Context, Result};
use brainprint_core::embedding::{EmbeddingService, FileEmbeddingProvider, MockEmbeddingProvider};
use brainprint_core::{Engine, EngineConfig, GameCatalog};
use brainprint_shared::EmbeddingProvider;

use crate::config::CliConfig;

pub fn build_engine(cli_config: &CliConfig) -> Result<Engine> {
    let engine_config = EngineConfig::load().context("failed to load engine configuration")?;

    let provider: Arc<dyn EmbeddingProvider> = match &cli_config.embedding_path {
        Some(path) => {
            tracing::info!(path = %path, "loading embeddings from file");
            Arc::new(
                FileEmbeddingProvider::load(path, &cli_config.default_language, engine_config.embedding_vector_dim, None, true)
                    .with_context(|| format!("failed to load embedding file {path}"))?,
            )
        }
        None => {
            tracing::info!("no embedding_path configured; using the deterministic mock provider");
            Arc::new(MockEmbeddingProvider::new(engine_config.embedding_vector_dim))
        }
    };

    let embeddings = Arc::new(EmbeddingService::new(provider, engine_config.embedding_cache_capacity));

    let mut catalog = GameCatalog::new();
    let scorer_embeddings = embeddings.clone();
    let scorer = Arc::new(brainprint_core::scorer::SemanticScorer::new(scorer_embeddings));
    catalog.register(Arc::new(word_midpoint::WordMidpointGame::new(scorer.clone())))?;
    catalog.register(Arc::new(cluster_sprint::ClusterSprintGame::new(scorer.clone())))?;
    catalog.register(Arc::new(synonym_arena::SynonymArenaGame::new(scorer.clone())))?;
    catalog.register(Arc::new(pivot_chain::PivotChainGame::new(scorer)))?;

    Ok(Engine::new(catalog, embeddings, engine_config))
}
