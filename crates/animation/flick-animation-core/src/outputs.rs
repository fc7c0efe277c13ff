//! Output contracts from the core engine.
//!
//! Outputs carry the instantaneous property writes for this tick (start-value
//! snaps and pre-phase resets) plus semantic events. Tweened motion never
//! appears here; it flows through the backend. Adapters apply changes to the
//! host and transport events.

use serde::{Deserialize, Serialize};

use crate::ids::WidgetId;
use crate::params::Vec3;
use crate::phase::Phase;

/// An instantaneous property write.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyWrite {
    Scale(Vec3),
    Position(Vec3),
    /// Euler degrees.
    Rotation(Vec3),
    Alpha(f32),
    GroupAlpha(f32),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub widget: WidgetId,
    pub write: PropertyWrite,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// A phase's motion was dispatched to the backend.
    PhaseStarted { widget: WidgetId, phase: Phase },
    /// A motion's final segment completed naturally.
    PhaseCompleted { widget: WidgetId, phase: Phase },
    /// The widget's terminal motion finished; the host must dispose it.
    DespawnRequested { widget: WidgetId },
}

/// Outputs returned by `Engine::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
