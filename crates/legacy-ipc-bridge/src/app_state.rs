//! Shared application state for the bridge.
//!
//! Holds the config, the type registry and the dispatcher. All three are
//! built at startup and never mutated afterwards, so connections share them
//! through a plain `Arc`.

use std::sync::Arc;

use legacy_ipc_core::error::Result;
use legacy_ipc_core::protocol::TypeRegistry;

use crate::config::BridgeConfig;
use crate::dispatch::{DifficultyHandler, Dispatcher};
use crate::services::DifficultyCalculationHandler;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: BridgeConfig,
    registry: TypeRegistry,
    dispatcher: Dispatcher,
}

impl AppState {
    /// Build application state with the built-in difficulty handler.
    pub fn new(cfg: BridgeConfig) -> Result<Self> {
        Self::with_handler(cfg, Arc::new(DifficultyCalculationHandler::builtin()))
    }

    /// Build application state around a custom difficulty handler.
    pub fn with_handler(cfg: BridgeConfig, difficulty: Arc<dyn DifficultyHandler>) -> Result<Self> {
        let registry = TypeRegistry::legacy()?;
        tracing::debug!(types = ?registry.registered_types(), "message types registered");

        let dispatcher = Dispatcher::new(difficulty);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                dispatcher,
            }),
        })
    }

    pub fn cfg(&self) -> &BridgeConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.inner.registry
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }
}
