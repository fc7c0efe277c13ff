use bevy::prelude::*;
use std::collections::HashMap;

use flick_animation_core::{
    Change, CoreEvent, Inputs, PropertyWrite, TweenBackend, WidgetCommand,
};

use crate::backend::{to_bevy, FlickTweens};
use crate::components::{AnimatedAlpha, AnimatedGroupAlpha, FlickWidget};
use crate::resources::{FlickEngine, FlickEvent, PendingCommands, PendingOutputs, WidgetIndex};

/// Rebuild the widget id → entity index from `FlickWidget` components.
pub fn build_widget_index(mut index: ResMut<WidgetIndex>, q: Query<(Entity, &FlickWidget)>) {
    index.map.clear();
    for (entity, fw) in &q {
        index.map.insert(fw.id, entity);
    }
}

/// Translate `Interaction` transitions into pointer commands. The first
/// observation of an entity only records its baseline, so freshly spawned
/// widgets don't emit a spurious pointer-exit.
pub fn collect_interactions(
    mut prev: Local<HashMap<Entity, Interaction>>,
    mut pending: ResMut<PendingCommands>,
    q: Query<(Entity, &FlickWidget, &Interaction), Changed<Interaction>>,
) {
    for (entity, fw, interaction) in &q {
        let seen_before = prev.insert(entity, *interaction).is_some();
        if !seen_before {
            continue;
        }
        let cmd = match interaction {
            Interaction::Pressed => WidgetCommand::Click { widget: fw.id },
            Interaction::Hovered => WidgetCommand::PointerEnter { widget: fw.id },
            Interaction::None => WidgetCommand::PointerExit { widget: fw.id },
        };
        pending.0.push(cmd);
    }
}

/// Step the core engine with this frame's commands, stage its property writes,
/// and re-emit its events.
pub fn tick_engine(
    mut eng: ResMut<FlickEngine>,
    mut tweens: ResMut<FlickTweens>,
    mut pending: ResMut<PendingCommands>,
    mut staged: ResMut<PendingOutputs>,
    mut events: EventWriter<FlickEvent>,
) {
    let inputs = Inputs {
        commands: std::mem::take(&mut pending.0),
    };
    let out = eng.0.update(inputs, &mut *tweens);
    staged.changes.clear();
    staged.changes.extend(out.changes.iter().copied());
    for ev in &out.events {
        events.send(FlickEvent(ev.clone()));
    }
}

/// Apply staged instantaneous writes (start-value snaps, rotation resets) to
/// the host components.
pub fn apply_outputs(
    staged: Res<PendingOutputs>,
    index: Res<WidgetIndex>,
    mut transforms: Query<&mut Transform>,
    mut alphas: Query<&mut AnimatedAlpha>,
    mut group_alphas: Query<&mut AnimatedGroupAlpha>,
) {
    for Change { widget, write } in staged.changes.iter() {
        let Some(&entity) = index.map.get(widget) else {
            continue;
        };
        match *write {
            PropertyWrite::Scale(v) => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    tf.scale = to_bevy(v);
                }
            }
            PropertyWrite::Position(v) => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    tf.translation = to_bevy(v);
                }
            }
            PropertyWrite::Rotation(e) => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    let e = to_bevy(e);
                    tf.rotation = Quat::from_euler(
                        EulerRot::XYZ,
                        e.x.to_radians(),
                        e.y.to_radians(),
                        e.z.to_radians(),
                    );
                }
            }
            PropertyWrite::Alpha(a) => {
                if let Ok(mut alpha) = alphas.get_mut(entity) {
                    alpha.0 = a;
                }
            }
            PropertyWrite::GroupAlpha(a) => {
                if let Ok(mut alpha) = group_alphas.get_mut(entity) {
                    alpha.0 = a;
                }
            }
        }
    }
}

/// Tear down widgets whose terminal motion finished: cancel any leftover
/// backend work, retire the core widget, and despawn the entity subtree.
pub fn handle_despawns(
    mut commands: Commands,
    mut reader: EventReader<FlickEvent>,
    mut eng: ResMut<FlickEngine>,
    mut tweens: ResMut<FlickTweens>,
    index: Res<WidgetIndex>,
) {
    for FlickEvent(ev) in reader.read() {
        if let CoreEvent::DespawnRequested { widget } = ev {
            tweens.cancel_all(*widget);
            eng.0.despawn(*widget);
            if let Some(&entity) = index.map.get(widget) {
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}
