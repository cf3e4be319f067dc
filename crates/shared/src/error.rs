use serde::{Deserialize, Serialize};

/// The engine's error taxonomy. Tagged for wire transport so a host boundary
/// can forward `{"type": ..., "detail": ...}` without re-deriving the mapping.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type", content = "detail")]
pub enum EngineError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("bad action for this plugin: {0}")]
    BadAction(String),
    #[error("mode not supported by this game: {0}")]
    ModeUnsupported(String),
    #[error("one-shot mode requires exactly one action, got {0}")]
    OneShotRequiresOneAction(usize),
    #[error("endurance requires 3-5 games, got {0}")]
    EnduranceBadLength(usize),
    #[error("vector dimension mismatch: {a} vs {b}")]
    DimensionMismatch { a: usize, b: usize },
    #[error("invalid rarity pattern: {0}")]
    InvalidPattern(String),

    #[error("embedding not found for '{word}' ({language})")]
    EmbeddingNotFound { word: String, language: String },
    #[error("cluster has no resolvable words")]
    EmptyCluster,

    #[error("milestone already claimed: {0}")]
    AlreadyClaimed(String),
    #[error("unknown milestone: {0}")]
    UnknownMilestone(String),
    #[error("milestone requirement not met")]
    NotAchieved,
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("embedding provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("store write conflict, retry")]
    StoreConflict,

    #[error("plugin contract violation: {0}")]
    PluginContractViolation(String),
    #[error("session cancelled")]
    Cancelled,
}

impl EngineError {
    /// Pure mapping from error kind to an HTTP-ish status code, for a host
    /// boundary to use. This crate never binds a socket; it only supplies
    /// the classification.
    pub fn http_status(&self) -> u16 {
        match self {
            EngineError::MissingField(_)
            | EngineError::BadAction(_)
            | EngineError::ModeUnsupported(_)
            | EngineError::OneShotRequiresOneAction(_)
            | EngineError::EnduranceBadLength(_)
            | EngineError::DimensionMismatch { .. }
            | EngineError::InvalidPattern(_) => 400,

            EngineError::EmbeddingNotFound { .. } | EngineError::EmptyCluster => 404,

            EngineError::AlreadyClaimed(_)
            | EngineError::UnknownMilestone(_)
            | EngineError::NotAchieved => 409,
            EngineError::InvariantViolation(_) => 500,

            EngineError::ProviderUnavailable(_) => 503,
            EngineError::StoreConflict => 409,

            EngineError::PluginContractViolation(_) => 500,
            EngineError::Cancelled => 499,
        }
    }

    /// `true` for kinds a caller should retry without changing its request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::ProviderUnavailable(_) | EngineError::StoreConflict
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_every_kind() {
        assert_eq!(EngineError::MissingField("x".into()).http_status(), 400);
        assert_eq!(
            EngineError::EmbeddingNotFound {
                word: "x".into(),
                language: "en".into()
            }
            .http_status(),
            404
        );
        assert_eq!(EngineError::AlreadyClaimed("m1".into()).http_status(), 409);
        assert_eq!(
            EngineError::InvariantViolation("two active seasons".into()).http_status(),
            500
        );
        assert_eq!(EngineError::ProviderUnavailable("x".into()).http_status(), 503);
        assert_eq!(EngineError::Cancelled.http_status(), 499);
    }

    #[test]
    fn serde_tag_roundtrip() {
        let e = EngineError::NotAchieved;
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["type"], "NotAchieved");
        let back: EngineError = serde_json::from_value(v).unwrap();
        assert!(matches!(back, EngineError::NotAchieved));
    }

    #[test]
    fn transient_kinds() {
        assert!(EngineError::StoreConflict.is_transient());
        assert!(!EngineError::NotAchieved.is_transient());
    }
}
