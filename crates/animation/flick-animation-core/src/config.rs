//! Core configuration.

use serde::{Deserialize, Serialize};

/// Engine sizing and backpressure knobs. Keep minimal; expand without
/// breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Initial capacity hint for the widget table.
    pub widget_capacity: usize,
    /// Events retained per tick; extras are dropped with a warning.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            widget_capacity: 64,
            max_events_per_tick: 256,
        }
    }
}
