use bevy::prelude::*;
use bevy_flick_animation::{
    AnimatedAlpha, FlickAnimationPlugin, FlickEngine, FlickWidget, PendingCommands,
};
use flick_animation_core::{
    LoopMode, MotionKind, MotionParams, Phase, PlayState, Vec3 as CoreVec3, WidgetCfg,
    WidgetCommand, WidgetId, WidgetKind,
};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(FlickAnimationPlugin);
    app
}

fn spawn_widget(app: &mut App, kind: WidgetKind) -> (WidgetId, Entity) {
    let id = {
        let mut eng = app.world_mut().resource_mut::<FlickEngine>();
        eng.0.spawn("test", kind, WidgetCfg::default())
    };
    let entity = app
        .world_mut()
        .spawn((
            Transform::default(),
            AnimatedAlpha::default(),
            FlickWidget { id },
        ))
        .id();
    (id, entity)
}

/// it should insert the engine and driver resources when the plugin is added
#[test]
fn plugin_inserts_resources() {
    let mut app = test_app();
    app.update();
    assert!(app.world().get_resource::<FlickEngine>().is_some());
    assert!(app
        .world()
        .get_resource::<bevy_flick_animation::FlickTweens>()
        .is_some());
}

/// it should apply start-value snaps to the entity's transform on dispatch
#[test]
fn run_start_snaps_scale() {
    let mut app = test_app();
    let (id, entity) = spawn_widget(&mut app, WidgetKind::Base);
    {
        let mut eng = app.world_mut().resource_mut::<FlickEngine>();
        eng.0
            .set_phase_params(
                id,
                Phase::Start,
                MotionParams {
                    kind: MotionKind::Scale,
                    duration: 1.0,
                    loop_mode: LoopMode::Once,
                    start_scale: CoreVec3::new(2.0, 2.0, 2.0),
                    end_scale: CoreVec3::ONE,
                    ..MotionParams::default()
                },
            )
            .unwrap();
    }
    app.world_mut()
        .resource_mut::<PendingCommands>()
        .0
        .push(WidgetCommand::RunStart { widget: id });

    app.update();

    let tf = app.world().entity(entity).get::<Transform>().unwrap();
    assert_eq!(tf.scale, Vec3::new(2.0, 2.0, 2.0));
    let eng = app.world().resource::<FlickEngine>();
    assert_eq!(eng.0.widget(id).unwrap().state(), PlayState::Start);
}

/// it should route pointer transitions through the core state machine
#[test]
fn interaction_changes_drive_button_phases() {
    let mut app = test_app();
    let (id, entity) = spawn_widget(&mut app, WidgetKind::Button { interactable: true });
    {
        let mut eng = app.world_mut().resource_mut::<FlickEngine>();
        eng.0
            .set_phase_params(
                id,
                Phase::Hover,
                MotionParams {
                    kind: MotionKind::Scale,
                    duration: 0.2,
                    loop_mode: LoopMode::Once,
                    end_scale: CoreVec3::new(1.1, 1.1, 1.1),
                    ..MotionParams::default()
                },
            )
            .unwrap();
    }
    app.world_mut().entity_mut(entity).insert(Interaction::None);
    // first frame only records the baseline interaction
    app.update();

    app.world_mut()
        .entity_mut(entity)
        .insert(Interaction::Hovered);
    app.update();

    let eng = app.world().resource::<FlickEngine>();
    assert_eq!(eng.0.widget(id).unwrap().state(), PlayState::ForcePlay);
}

/// it should despawn the entity once its terminal motion completes
#[test]
fn destroy_on_complete_despawns_entity() {
    let mut app = test_app();
    let (id, entity) = spawn_widget(&mut app, WidgetKind::Base);
    {
        let mut eng = app.world_mut().resource_mut::<FlickEngine>();
        eng.0
            .set_phase_params(
                id,
                Phase::End,
                MotionParams {
                    kind: MotionKind::Fade,
                    duration: 0.0,
                    loop_mode: LoopMode::Once,
                    start_alpha: 1.0,
                    end_alpha: 0.0,
                    destroy_on_complete: true,
                    ..MotionParams::default()
                },
            )
            .unwrap();
    }
    app.world_mut()
        .resource_mut::<PendingCommands>()
        .0
        .push(WidgetCommand::RunEnd { widget: id });

    for _ in 0..5 {
        app.update();
    }

    assert!(app.world().get_entity(entity).is_none());
    let eng = app.world().resource::<FlickEngine>();
    assert!(!eng.0.widget(id).unwrap().is_alive());
}
