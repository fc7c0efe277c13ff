use bevy::prelude::*;
use flick_animation_core::WidgetId;

/// Links an entity to its widget in the core engine. The index system keeps
/// the id → entity map in sync every frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct FlickWidget {
    pub id: WidgetId,
}

/// Per-widget opacity output. The core writes it; how it reaches the render
/// path (text color, image tint, …) is up to the app.
#[derive(Component, Debug, Clone, Copy)]
pub struct AnimatedAlpha(pub f32);

impl Default for AnimatedAlpha {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Container-level opacity output for panel widgets, applied to the whole
/// subtree by the app.
#[derive(Component, Debug, Clone, Copy)]
pub struct AnimatedGroupAlpha(pub f32);

impl Default for AnimatedGroupAlpha {
    fn default() -> Self {
        Self(1.0)
    }
}
