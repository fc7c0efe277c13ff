//! Panel behavior: open/close force-plays and the group-fade motion.

use flick_animation_core::{
    Change, Config, CoreEvent, Engine, Inputs, LoopMode, MotionKind, MotionParams, Outputs, Phase,
    PlayState, PropertyWrite, TweenOp, WidgetCfg, WidgetCommand, WidgetId, WidgetKind,
};
use flick_test_fixtures::RecordingTweens;

fn group_fade(start_alpha: f32, end_alpha: f32) -> MotionParams {
    MotionParams {
        kind: MotionKind::GroupFade,
        duration: 0.2,
        loop_mode: LoopMode::Once,
        start_alpha,
        end_alpha,
        ..MotionParams::default()
    }
}

fn step(eng: &mut Engine, backend: &mut RecordingTweens, commands: Vec<WidgetCommand>) -> Outputs {
    eng.update(Inputs { commands }, backend).clone()
}

fn started(out: &Outputs, w: WidgetId, p: Phase) -> bool {
    out.events
        .iter()
        .any(|e| matches!(e, CoreEvent::PhaseStarted { widget, phase } if *widget == w && *phase == p))
}

/// it should force-play open and close with the container-level fade
#[test]
fn open_snaps_group_alpha_then_tweens() {
    let mut eng = Engine::new(Config::default());
    let mut backend = RecordingTweens::new();
    let w = eng.spawn("settings", WidgetKind::Panel, WidgetCfg::default());
    eng.set_phase_params(w, Phase::Open, group_fade(0.0, 1.0)).unwrap();
    eng.set_phase_params(w, Phase::Close, group_fade(1.0, 0.0)).unwrap();

    let out = step(&mut eng, &mut backend, vec![WidgetCommand::OpenPanel { widget: w }]);
    assert!(started(&out, w, Phase::Open));
    assert_eq!(eng.widget(w).unwrap().state(), PlayState::ForcePlay);
    assert!(out.changes.contains(&Change {
        widget: w,
        write: PropertyWrite::GroupAlpha(0.0),
    }));
    assert_eq!(
        backend.last_submitted().unwrap().spec.op,
        TweenOp::GroupFadeTo(1.0)
    );

    let out = step(&mut eng, &mut backend, vec![WidgetCommand::ClosePanel { widget: w }]);
    assert!(started(&out, w, Phase::Close));
    assert_eq!(
        backend.last_submitted().unwrap().spec.op,
        TweenOp::GroupFadeTo(0.0)
    );
    // the close displaced the open motion
    assert!(backend.cancels.contains(&w));
    assert_eq!(backend.live_count(), 1);
}

/// it should ignore open/close entirely when the phase is unconfigured
#[test]
fn unconfigured_open_is_ignored_entirely() {
    let mut eng = Engine::new(Config::default());
    let mut backend = RecordingTweens::new();
    let w = eng.spawn("settings", WidgetKind::Panel, WidgetCfg::default());
    eng.set_phase_params(
        w,
        Phase::Update,
        MotionParams {
            kind: MotionKind::Scale,
            duration: 0.5,
            loop_mode: LoopMode::Loop,
            ..MotionParams::default()
        },
    )
    .unwrap();
    step(&mut eng, &mut backend, vec![WidgetCommand::RunUpdate { widget: w }]);
    assert_eq!(backend.live_count(), 1);

    // unlike button interactions, an empty open slot changes nothing:
    // no cancel, no state flip
    let out = step(&mut eng, &mut backend, vec![WidgetCommand::OpenPanel { widget: w }]);
    assert!(out.is_empty());
    assert!(backend.cancels.is_empty());
    assert_eq!(eng.widget(w).unwrap().state(), PlayState::Update);
    assert_eq!(backend.live_count(), 1);
}

/// it should run panel lifecycle phases through the ordinary per-kind dispatch
#[test]
fn panel_still_plays_base_motions() {
    let mut eng = Engine::new(Config::default());
    let mut backend = RecordingTweens::new();
    let w = eng.spawn("settings", WidgetKind::Panel, WidgetCfg::default());
    eng.set_phase_params(
        w,
        Phase::Start,
        MotionParams {
            kind: MotionKind::Fade,
            duration: 0.25,
            start_alpha: 0.0,
            end_alpha: 1.0,
            loop_mode: LoopMode::Once,
            ..MotionParams::default()
        },
    )
    .unwrap();

    let out = step(&mut eng, &mut backend, vec![WidgetCommand::RunStart { widget: w }]);
    assert!(out.changes.contains(&Change {
        widget: w,
        write: PropertyWrite::Alpha(0.0),
    }));
    assert_eq!(backend.last_submitted().unwrap().spec.op, TweenOp::FadeTo(1.0));
}

/// it should ignore open/close on widgets that are not panels
#[test]
fn open_close_on_non_panels_is_ignored() {
    let mut eng = Engine::new(Config::default());
    let mut backend = RecordingTweens::new();
    let w = eng.spawn(
        "button",
        WidgetKind::Button { interactable: true },
        WidgetCfg::default(),
    );

    let out = step(&mut eng, &mut backend, vec![WidgetCommand::OpenPanel { widget: w }]);
    assert!(out.is_empty());
    assert!(backend.submitted.is_empty());
}
