//! Flick Animation Core (engine-agnostic)
//!
//! A phase-driven animation player for UI widgets: each widget owns named
//! phases (start, update, end, plus button/panel interaction phases), every
//! phase carries a motion parameter set, and lifecycle/pointer commands decide
//! which phase plays. Interpolation is delegated to an external tween backend;
//! the core contributes the state machine, the parameter/preset model, and the
//! per-kind dispatch rules.

pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod outputs;
pub mod params;
pub mod phase;
pub mod policy;
pub mod preset;
pub mod tween;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use engine::{Engine, Widget, WidgetCfg};
pub use error::AnimError;
pub use ids::{PresetId, TweenId, WidgetId};
pub use inputs::{Inputs, WidgetCommand};
pub use outputs::{Change, CoreEvent, Outputs, PropertyWrite};
pub use params::{MotionKind, MotionParams, PhaseSlot, SpinAxis, Vec3};
pub use phase::{Phase, PlayState, WidgetKind};
pub use preset::{parse_preset_json, preset_to_json, Preset, PresetLibrary};
pub use tween::{Ease, LoopMode, TweenBackend, TweenOp, TweenSpec};
