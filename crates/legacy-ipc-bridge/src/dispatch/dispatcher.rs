use std::sync::Arc;

use async_trait::async_trait;
use tracing::Span;

use legacy_ipc_core::protocol::{DifficultyCalculationRequest, IpcMessage};

use crate::difficulty::CalculationOutcome;
use crate::transport::Stage;

/// Handler for `DifficultyCalculationRequest`. Must never fail: every error
/// is folded into the outcome.
#[async_trait]
pub trait DifficultyHandler: Send + Sync {
    async fn handle(&self, req: DifficultyCalculationRequest) -> CalculationOutcome;
}

/// Routes typed messages to their handler by variant.
///
/// Built once at startup; read-only afterwards.
pub struct Dispatcher {
    difficulty: Arc<dyn DifficultyHandler>,
}

impl Dispatcher {
    pub fn new(difficulty: Arc<dyn DifficultyHandler>) -> Self {
        Self { difficulty }
    }

    /// Invoke the handler for `msg`. `None` means nothing is sent back.
    pub async fn dispatch(&self, msg: IpcMessage, span: &Span) -> Option<IpcMessage> {
        match msg {
            IpcMessage::DifficultyCalculationRequest(req) => {
                let ruleset_id = req.ruleset_id;
                let mods = req.mods;
                // Injected handlers may build outcomes by hand.
                let outcome = self.difficulty.handle(req).await.checked();

                match &outcome.failure {
                    Some(err) => tracing::warn!(
                        parent: span,
                        ruleset_id,
                        mods,
                        kind = err.kind(),
                        error = %err,
                        "difficulty calculation failed, replying with zero rating"
                    ),
                    None => tracing::debug!(
                        parent: span,
                        ruleset_id,
                        mods,
                        star_rating = outcome.response.star_rating,
                        "difficulty calculated"
                    ),
                }

                Some(outcome.response.into())
            }
            // Registered so it decodes, but the bridge never serves it.
            IpcMessage::DifficultyCalculationResponse(_) => {
                tracing::info!(
                    parent: span,
                    stage = Stage::Dispatching.as_str(),
                    tag = msg.tag(),
                    "unhandled message kind"
                );
                None
            }
        }
    }
}
