//! Bevy plugin wrapping the flick animation core.
//!
//! The plugin owns the engine, a frame-clock tween driver, and the glue
//! between `Interaction` changes and core commands. Per frame, in order:
//! rebuild the widget index, collect pointer transitions, advance tweens,
//! tick the engine, apply its property writes, and honor despawn requests.

use bevy::prelude::*;

pub mod backend;
pub mod components;
pub mod resources;
pub mod systems;

pub use backend::FlickTweens;
pub use components::{AnimatedAlpha, AnimatedGroupAlpha, FlickWidget};
pub use resources::{FlickEngine, FlickEvent, PendingCommands, PendingOutputs, WidgetIndex};

use flick_animation_core::{Config, Engine};

pub struct FlickAnimationPlugin;

impl Plugin for FlickAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FlickEngine(Engine::new(Config::default())))
            .init_resource::<FlickTweens>()
            .init_resource::<PendingCommands>()
            .init_resource::<WidgetIndex>()
            .init_resource::<PendingOutputs>()
            .add_event::<FlickEvent>()
            .add_systems(
                Update,
                (
                    systems::build_widget_index,
                    systems::collect_interactions,
                    backend::advance_tweens,
                    systems::tick_engine,
                    systems::apply_outputs,
                    systems::handle_despawns,
                )
                    .chain(),
            );
    }
}
