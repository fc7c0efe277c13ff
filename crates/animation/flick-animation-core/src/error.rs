//! Error types for the animation core.

use serde::{Deserialize, Serialize};

use crate::ids::{PresetId, WidgetId};

/// Errors surfaced by fallible API operations. Playback itself never errors:
/// unconfigured phases and unknown widgets are valid no-op states.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimError {
    #[error("widget not found: {id:?}")]
    WidgetNotFound { id: WidgetId },

    #[error("preset not found: {id:?}")]
    PresetNotFound { id: PresetId },

    #[error("phase '{phase}' is not supported by {kind} widgets")]
    UnsupportedPhase { kind: String, phase: String },

    #[error("phase '{phase}' has no parameters")]
    EmptyPhase { phase: String },

    #[error("phase '{phase}' is not linked to a preset")]
    NoLinkedPreset { phase: String },

    #[error("invalid motion parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("preset serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for AnimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_round_trip() {
        let err = AnimError::EmptyPhase {
            phase: "hover".into(),
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: AnimError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
