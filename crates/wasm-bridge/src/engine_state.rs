use file_format::{LoadError, SaveError};
use floor_engine::{Engine, PlanError};
use plan_types::PlanConfig;

/// The engine state wrapper for the WASM bridge.
pub struct EngineState {
    /// The floor-plan engine.
    pub engine: Engine,
}

impl EngineState {
    pub fn new() -> Self {
        Self::with_config(PlanConfig::default())
    }

    pub fn with_config(config: PlanConfig) -> Self {
        Self {
            engine: Engine::with_config(config),
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from the WASM bridge layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("La hauteur doit être un nombre (reçu {value:?}).")]
    InvalidHeight { value: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl BridgeError {
    /// Title of the alert shown for this error.
    pub fn title(&self) -> &'static str {
        match self {
            BridgeError::Plan(e) => e.title(),
            BridgeError::Load(e) => e.title(),
            BridgeError::Save(e) => e.title(),
            BridgeError::InvalidHeight { .. } => "Hauteur invalide",
            BridgeError::Serialization { .. } => "Message invalide",
        }
    }
}

/// Parse a floor height typed by the user. Any finite number is accepted.
pub fn parse_height(input: &str) -> Result<f64, BridgeError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .ok_or_else(|| BridgeError::InvalidHeight {
            value: input.to_string(),
        })
}
