//! Game catalog (C5): a write-once-at-startup, read-many registry of
//! plugins keyed by id.

use std::collections::HashMap;
use std::sync::Arc;

use brainprint_shared::{EngineError, EngineResult, GamePlugin, Mode};

pub struct GameCatalog {
    by_id: HashMap<String, Arc<dyn GamePlugin>>,
}

impl GameCatalog {
    pub fn new() -> Self {
        Self { by_id: HashMap::new() }
    }

    /// Rejects a plugin with a blank id/name, no supported modes, or an id
    /// that collides with one already registered.
    pub fn register(&mut self, plugin: Arc<dyn GamePlugin>) -> EngineResult<()> {
        if plugin.id().trim().is_empty() {
            return Err(EngineError::MissingField("id".into()));
        }
        if plugin.name().trim().is_empty() {
            return Err(EngineError::MissingField("name".into()));
        }
        if plugin.supported_modes().is_empty() {
            return Err(EngineError::MissingField("supported_modes".into()));
        }
        if self.by_id.contains_key(plugin.id()) {
            return Err(EngineError::PluginContractViolation(format!(
                "duplicate game id: {}",
                plugin.id()
            )));
        }
        self.by_id.insert(plugin.id().to_string(), plugin);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn GamePlugin>> {
        self.by_id.get(id).cloned()
    }

    pub fn has(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get_all(&self) -> Vec<Arc<dyn GamePlugin>> {
        self.by_id.values().cloned().collect()
    }

    pub fn get_by_mode(&self, mode: Mode) -> Vec<Arc<dyn GamePlugin>> {
        self.by_id
            .values()
            .filter(|p| p.supported_modes().contains(&mode))
            .cloned()
            .collect()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::new()
    }
}
