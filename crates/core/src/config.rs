//! Engine configuration (C11): env-driven, range-validated, with
//! `tracing::warn!` fallbacks. Mirrors the teacher's `AppConfig::load()`
//! split between parsing and validation.

use std::env;

/// Tunables for the engine's shared resources and default runner
/// parameters. Every field has a sane default so `EngineConfig::load()`
/// never requires an `.env` file to boot.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub embedding_cache_capacity: usize,
    pub embedding_vector_dim: usize,
    pub default_language: String,
    pub journey_max_steps_default: u32,
    pub arena_duration_ms_default: i64,
    /// Guardrail against unbounded action input, analogous to the
    /// teacher's `MAX_EVENT_DEPTH` cascading guard -- there is no event
    /// bus here, so this bounds the one place a caller controls the
    /// amount of work a session can demand.
    pub session_action_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            embedding_cache_capacity: 10_000,
            embedding_vector_dim: 300,
            default_language: "en".to_string(),
            journey_max_steps_default: 5,
            arena_duration_ms_default: 60_000,
            session_action_limit: 10_000,
        }
    }
}

impl EngineConfig {
    pub fn load() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let embedding_cache_capacity = parse_env_or(
            "EMBEDDING_CACHE_CAPACITY",
            defaults.embedding_cache_capacity,
        )?;
        if embedding_cache_capacity == 0 {
            anyhow::bail!("EMBEDDING_CACHE_CAPACITY must be > 0");
        }

        let embedding_vector_dim =
            parse_env_or("EMBEDDING_VECTOR_DIM", defaults.embedding_vector_dim)?;
        if !(1..=4096).contains(&embedding_vector_dim) {
            anyhow::bail!(
                "EMBEDDING_VECTOR_DIM must be between 1 and 4096 (got {})",
                embedding_vector_dim
            );
        }

        let default_language =
            env::var("DEFAULT_LANGUAGE").unwrap_or(defaults.default_language);
        if default_language.trim().is_empty() {
            tracing::warn!("DEFAULT_LANGUAGE is blank; falling back to \"en\"");
        }
        let default_language = if default_language.trim().is_empty() {
            "en".to_string()
        } else {
            default_language
        };

        let journey_max_steps_default = parse_env_or(
            "JOURNEY_MAX_STEPS_DEFAULT",
            defaults.journey_max_steps_default,
        )?;
        if !(1..=50).contains(&journey_max_steps_default) {
            anyhow::bail!(
                "JOURNEY_MAX_STEPS_DEFAULT must be between 1 and 50 (got {})",
                journey_max_steps_default
            );
        }

        let arena_duration_ms_default = parse_env_or(
            "ARENA_DURATION_MS_DEFAULT",
            defaults.arena_duration_ms_default,
        )?;
        if !(1_000..=3_600_000).contains(&arena_duration_ms_default) {
            anyhow::bail!(
                "ARENA_DURATION_MS_DEFAULT must be between 1000 and 3600000 (got {})",
                arena_duration_ms_default
            );
        }

        let session_action_limit =
            parse_env_or("SESSION_ACTION_LIMIT", defaults.session_action_limit)?;
        if session_action_limit == 0 {
            anyhow::bail!("SESSION_ACTION_LIMIT must be > 0");
        }
        if session_action_limit > 1_000_000 {
            tracing::warn!(
                limit = session_action_limit,
                "SESSION_ACTION_LIMIT is unusually large; this removes most of the guardrail's value"
            );
        }

        Ok(Self {
            embedding_cache_capacity,
            embedding_vector_dim,
            default_language,
            journey_max_steps_default,
            arena_duration_ms_default,
            session_action_limit,
        })
    }
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("failed to parse {key}: {e}")),
        Err(_) => Ok(default),
    }
}
