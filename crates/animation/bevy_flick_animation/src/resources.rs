use bevy::prelude::*;
use std::collections::HashMap;

use flick_animation_core::{Change, CoreEvent, Engine, WidgetCommand, WidgetId};

/// The core engine as a Bevy resource.
#[derive(Resource)]
pub struct FlickEngine(pub Engine);

/// Commands queued by gameplay/UI systems this frame, consumed by the engine
/// tick.
#[derive(Resource, Default)]
pub struct PendingCommands(pub Vec<WidgetCommand>);

/// Index from widget id to entity, rebuilt each frame by walking
/// `FlickWidget` components.
#[derive(Resource, Default)]
pub struct WidgetIndex {
    pub map: HashMap<WidgetId, Entity>,
}

/// Outputs staged from `Engine::update` to be applied in a separate system
/// (keeps ordering explicit: Compute -> Apply).
#[derive(Resource, Default)]
pub struct PendingOutputs {
    pub changes: Vec<Change>,
}

/// Core events re-emitted as Bevy events.
#[derive(Event, Debug, Clone)]
pub struct FlickEvent(pub CoreEvent);
