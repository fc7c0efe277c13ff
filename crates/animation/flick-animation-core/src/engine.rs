//! Engine: widget ownership and the phase-dispatch state machine.
//!
//! Methods:
//! - new, spawn, despawn, set_phase_params, load_preset, preset store ops,
//!   update (drain completions → apply commands)
//!
//! All motion progression happens in the backend; the engine only decides
//! which phase plays, translates it into tween specs, and reacts to
//! completions (chaining, destroy-on-complete).

use hashbrown::HashMap;

use crate::config::Config;
use crate::error::AnimError;
use crate::ids::{IdAllocator, PresetId, TweenId, WidgetId};
use crate::inputs::{Inputs, WidgetCommand};
use crate::outputs::{Change, CoreEvent, Outputs, PropertyWrite};
use crate::params::{MotionKind, MotionParams, PhaseSlot, Vec3};
use crate::phase::{Phase, PlayState, WidgetKind};
use crate::policy::{policy_for, FollowUp, PrePhase};
use crate::preset::{Preset, PresetLibrary};
use crate::tween::{LoopMode, TweenBackend, TweenOp, TweenSpec};

/// Configuration for spawning a widget.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct WidgetCfg {
    /// Run the start phase automatically on the first update after spawn.
    #[serde(default)]
    pub play_on_start: bool,
}

/// Two-segment motions (move, rotate) first travel to their start value, then
/// to their end value. Only the main segment's completion reaches the
/// state-machine hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Segment {
    Intro,
    Main,
}

/// The one motion (or two-segment pair) in flight for a widget.
#[derive(Copy, Clone, Debug)]
struct ActiveMotion {
    phase: Phase,
    tween: TweenId,
    segment: Segment,
    destroy_on_complete: bool,
}

/// One animated entity: a phase table plus the playback state machine.
#[derive(Debug)]
pub struct Widget {
    pub id: WidgetId,
    pub name: String,
    kind: WidgetKind,
    play_on_start: bool,
    phases: HashMap<Phase, PhaseSlot>,
    state: PlayState,
    active: Option<ActiveMotion>,
    alive: bool,
}

impl Widget {
    fn new(id: WidgetId, name: String, kind: WidgetKind, cfg: WidgetCfg) -> Self {
        Self {
            id,
            name,
            kind,
            play_on_start: cfg.play_on_start,
            phases: HashMap::new(),
            state: PlayState::default(),
            active: None,
            alive: true,
        }
    }

    #[inline]
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn play_on_start(&self) -> bool {
        self.play_on_start
    }

    #[inline]
    pub fn has_motion_in_flight(&self) -> bool {
        self.active.is_some()
    }

    pub fn phase_slot(&self, phase: Phase) -> Option<&PhaseSlot> {
        self.phases.get(&phase)
    }
}

/// The animation player core. Owns widgets and the preset store; delegates
/// interpolation to a [`TweenBackend`] passed into `update`.
#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    widgets: Vec<Widget>,
    presets: PresetLibrary,
    pending_starts: Vec<WidgetId>,
    outputs: Outputs,
    completed_scratch: Vec<TweenId>,
}

impl Engine {
    pub fn new(cfg: Config) -> Self {
        Self {
            widgets: Vec::with_capacity(cfg.widget_capacity),
            cfg,
            ids: IdAllocator::new(),
            presets: PresetLibrary::new(),
            pending_starts: Vec::new(),
            outputs: Outputs::default(),
            completed_scratch: Vec::new(),
        }
    }

    // ----- widget lifecycle -----

    /// Create a widget. With `play_on_start` set, the start phase runs once on
    /// the next `update`.
    pub fn spawn(&mut self, name: &str, kind: WidgetKind, cfg: WidgetCfg) -> WidgetId {
        let id = self.ids.alloc_widget();
        self.widgets.push(Widget::new(id, name.to_string(), kind, cfg));
        if cfg.play_on_start {
            self.pending_starts.push(id);
        }
        id
    }

    /// Host-initiated teardown. The widget stops accepting phases; the host
    /// is responsible for cancelling its backend tweens.
    pub fn despawn(&mut self, id: WidgetId) {
        if let Some(w) = self.widget_mut(id) {
            w.alive = false;
            w.active = None;
        }
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    /// Flip a button's interactable flag. Ignored for other kinds.
    pub fn set_interactable(&mut self, id: WidgetId, interactable: bool) {
        if let Some(w) = self.widget_mut(id) {
            if let WidgetKind::Button { .. } = w.kind {
                w.kind = WidgetKind::Button { interactable };
            }
        }
    }

    // ----- phase configuration -----

    /// Set a phase's parameters wholesale. An existing preset link survives so
    /// edits show up as unsaved changes.
    pub fn set_phase_params(
        &mut self,
        id: WidgetId,
        phase: Phase,
        params: MotionParams,
    ) -> Result<(), AnimError> {
        params.validate_basic()?;
        let w = self
            .widget_mut(id)
            .ok_or(AnimError::WidgetNotFound { id })?;
        if !w.kind.supports(phase) {
            return Err(AnimError::UnsupportedPhase {
                kind: w.kind.name().to_string(),
                phase: phase.name().to_string(),
            });
        }
        match w.phases.get_mut(&phase) {
            Some(slot) => slot.params = params,
            None => {
                w.phases.insert(phase, PhaseSlot::new(params));
            }
        }
        Ok(())
    }

    /// Load a preset into a phase slot: copies every field and records the
    /// provenance link. Loading `None` only clears the link on an existing
    /// slot; it never fabricates a playable parameter set.
    pub fn load_preset(
        &mut self,
        id: WidgetId,
        phase: Phase,
        preset: Option<PresetId>,
    ) -> Result<(), AnimError> {
        let params = match preset {
            Some(pid) => Some(
                self.presets
                    .get(pid)
                    .ok_or(AnimError::PresetNotFound { id: pid })?
                    .params
                    .clone(),
            ),
            None => None,
        };
        let w = self
            .widget_mut(id)
            .ok_or(AnimError::WidgetNotFound { id })?;
        if !w.kind.supports(phase) {
            return Err(AnimError::UnsupportedPhase {
                kind: w.kind.name().to_string(),
                phase: phase.name().to_string(),
            });
        }
        match (preset, params) {
            (Some(pid), Some(params)) => match w.phases.get_mut(&phase) {
                Some(slot) => slot.apply_preset(pid, &params),
                None => {
                    w.phases.insert(phase, PhaseSlot::from_preset(pid, params));
                }
            },
            _ => {
                if let Some(slot) = w.phases.get_mut(&phase) {
                    slot.preset = None;
                }
            }
        }
        Ok(())
    }

    /// Pure unsaved-change check: the live snapshot against the linked
    /// preset's current fields. A slot without a link has nothing saved and
    /// reports `true`; a missing slot reports `false`.
    pub fn has_unsaved_changes(&self, id: WidgetId, phase: Phase) -> bool {
        let Some(slot) = self.widget(id).and_then(|w| w.phase_slot(phase)) else {
            return false;
        };
        match slot.preset.and_then(|pid| self.presets.get(pid)) {
            Some(preset) => preset.params != slot.params,
            None => true,
        }
    }

    /// "Save As New": persist the live snapshot as a fresh preset and link
    /// the slot to it.
    pub fn save_phase_as_preset(
        &mut self,
        id: WidgetId,
        phase: Phase,
        name: &str,
    ) -> Result<PresetId, AnimError> {
        let w = self
            .widget(id)
            .ok_or(AnimError::WidgetNotFound { id })?;
        let slot = w.phase_slot(phase).ok_or(AnimError::EmptyPhase {
            phase: phase.name().to_string(),
        })?;
        let preset = Preset {
            name: name.to_string(),
            params: slot.params.clone(),
        };
        let pid = self.ids.alloc_preset();
        self.presets.insert(pid, preset);
        if let Some(slot) = self
            .widget_mut(id)
            .and_then(|w| w.phases.get_mut(&phase))
        {
            slot.preset = Some(pid);
        }
        Ok(pid)
    }

    /// "Update Preset": push the live snapshot into the linked preset. The
    /// mutation is shared — every other slot referencing the preset sees it
    /// on next load.
    pub fn update_linked_preset(
        &mut self,
        id: WidgetId,
        phase: Phase,
    ) -> Result<PresetId, AnimError> {
        let w = self
            .widget(id)
            .ok_or(AnimError::WidgetNotFound { id })?;
        let slot = w.phase_slot(phase).ok_or(AnimError::EmptyPhase {
            phase: phase.name().to_string(),
        })?;
        let pid = slot.preset.ok_or(AnimError::NoLinkedPreset {
            phase: phase.name().to_string(),
        })?;
        let params = slot.params.clone();
        let preset = self
            .presets
            .get_mut(pid)
            .ok_or(AnimError::PresetNotFound { id: pid })?;
        preset.params = params;
        Ok(pid)
    }

    // ----- preset store -----

    pub fn add_preset(&mut self, preset: Preset) -> Result<PresetId, AnimError> {
        preset.params.validate_basic()?;
        let id = self.ids.alloc_preset();
        self.presets.insert(id, preset);
        Ok(id)
    }

    pub fn update_preset(
        &mut self,
        id: PresetId,
        params: MotionParams,
    ) -> Result<(), AnimError> {
        params.validate_basic()?;
        let preset = self
            .presets
            .get_mut(id)
            .ok_or(AnimError::PresetNotFound { id })?;
        preset.params = params;
        Ok(())
    }

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }

    // ----- stepping -----

    /// Step the machine: consume backend completions, then apply this tick's
    /// commands. Returns the property writes and events produced.
    pub fn update(&mut self, inputs: Inputs, backend: &mut dyn TweenBackend) -> &Outputs {
        self.outputs.clear();

        let starts = std::mem::take(&mut self.pending_starts);
        for id in starts {
            if let Some(idx) = self.index_of(id) {
                self.run_lifecycle(idx, PlayState::Start, Phase::Start, backend);
            }
        }

        let mut completed = std::mem::take(&mut self.completed_scratch);
        completed.clear();
        backend.drain_completed(&mut completed);
        for tween in completed.drain(..) {
            self.handle_completion(tween, backend);
        }
        self.completed_scratch = completed;

        for cmd in inputs.commands {
            self.apply_command(cmd, backend);
        }

        &self.outputs
    }

    fn apply_command(&mut self, cmd: WidgetCommand, backend: &mut dyn TweenBackend) {
        let Some(idx) = self.index_of(cmd.widget()) else {
            log::debug!("ignoring command for unknown widget: {cmd:?}");
            return;
        };
        if !self.widgets[idx].alive {
            return;
        }
        let kind = self.widgets[idx].kind;
        match cmd {
            WidgetCommand::RunStart { .. } => {
                self.run_lifecycle(idx, PlayState::Start, Phase::Start, backend);
            }
            WidgetCommand::RunUpdate { .. } => {
                self.run_lifecycle(idx, PlayState::Update, Phase::Update, backend);
            }
            WidgetCommand::RunEnd { .. } => {
                self.run_lifecycle(idx, PlayState::End, Phase::End, backend);
            }
            WidgetCommand::Click { .. } => match kind {
                WidgetKind::Button { interactable } => {
                    let phase = if interactable {
                        Phase::Click
                    } else {
                        Phase::DisabledClick
                    };
                    self.force_play(idx, phase, backend);
                }
                _ => log::debug!("click on non-button widget {:?}", cmd.widget()),
            },
            WidgetCommand::PointerEnter { .. } => match kind {
                WidgetKind::Button { interactable } => {
                    let phase = if interactable {
                        Phase::Hover
                    } else {
                        Phase::DisabledHover
                    };
                    self.force_play(idx, phase, backend);
                }
                _ => log::debug!("pointer-enter on non-button widget {:?}", cmd.widget()),
            },
            WidgetCommand::PointerExit { .. } => match kind {
                WidgetKind::Button { .. } => self.force_play(idx, Phase::Unhover, backend),
                _ => log::debug!("pointer-exit on non-button widget {:?}", cmd.widget()),
            },
            WidgetCommand::Select { .. } => match kind {
                WidgetKind::Button { .. } => self.force_play(idx, Phase::Select, backend),
                _ => log::debug!("select on non-button widget {:?}", cmd.widget()),
            },
            WidgetCommand::Unselect { .. } => match kind {
                WidgetKind::Button { .. } => self.force_play(idx, Phase::Unselect, backend),
                _ => log::debug!("unselect on non-button widget {:?}", cmd.widget()),
            },
            WidgetCommand::OpenPanel { .. } => self.panel_phase(idx, Phase::Open, backend),
            WidgetCommand::ClosePanel { .. } => self.panel_phase(idx, Phase::Close, backend),
            WidgetCommand::SetInteractable { interactable, .. } => {
                let w = &mut self.widgets[idx];
                if let WidgetKind::Button { .. } = w.kind {
                    w.kind = WidgetKind::Button { interactable };
                }
            }
        }
    }

    /// Start/Update/End: set the state marker and play the phase.
    fn run_lifecycle(
        &mut self,
        idx: usize,
        state: PlayState,
        phase: Phase,
        backend: &mut dyn TweenBackend,
    ) {
        if !self.widgets[idx].alive {
            return;
        }
        self.widgets[idx].state = state;
        self.play_phase(idx, phase, backend);
    }

    /// Interaction phases: cancel whatever is in flight, mark the state as
    /// force-play, then play. Last writer wins; nothing queues. The cancel
    /// happens even when the phase turns out to be unconfigured.
    fn force_play(&mut self, idx: usize, phase: Phase, backend: &mut dyn TweenBackend) {
        if !self.widgets[idx].alive {
            return;
        }
        backend.cancel_all(self.widgets[idx].id);
        self.widgets[idx].active = None;
        self.widgets[idx].state = PlayState::ForcePlay;
        self.play_phase(idx, phase, backend);
    }

    /// Open/Close are force-plays, except an unconfigured slot is ignored
    /// entirely: no cancel, no state change.
    fn panel_phase(&mut self, idx: usize, phase: Phase, backend: &mut dyn TweenBackend) {
        let w = &self.widgets[idx];
        if !matches!(w.kind, WidgetKind::Panel) {
            log::debug!("{} command on non-panel widget {:?}", phase.name(), w.id);
            return;
        }
        if !w.phases.contains_key(&phase) {
            return;
        }
        self.force_play(idx, phase, backend);
    }

    /// Translate a phase's parameter set into backend work. Unconfigured
    /// phases are a no-op; the backend is never touched for them.
    fn play_phase(&mut self, idx: usize, phase: Phase, backend: &mut dyn TweenBackend) {
        // single-flight: a new phase always displaces the previous motion
        if self.widgets[idx].active.is_some() {
            backend.cancel_all(self.widgets[idx].id);
            self.widgets[idx].active = None;
        }

        let Some(slot) = self.widgets[idx].phases.get(&phase) else {
            return;
        };
        let params = slot.params.clone();
        let widget_id = self.widgets[idx].id;
        let state = self.widgets[idx].state;
        let policy = policy_for(&self.widgets[idx].kind);

        if policy.before_phase(phase) == PrePhase::ZeroRotation {
            self.push_change(Change {
                widget: widget_id,
                write: PropertyWrite::Rotation(Vec3::ZERO),
            });
        }

        let loop_mode = if state.loops() {
            params.loop_mode
        } else {
            LoopMode::Once
        };

        let (segment, op) = match params.kind {
            MotionKind::Scale => {
                self.push_change(Change {
                    widget: widget_id,
                    write: PropertyWrite::Scale(params.start_scale),
                });
                (Segment::Main, TweenOp::ScaleTo(params.end_scale))
            }
            MotionKind::Move => (Segment::Intro, TweenOp::MoveTo(params.start_position)),
            MotionKind::Rotate => (Segment::Intro, TweenOp::RotateTo(params.start_rotation)),
            MotionKind::Fade => {
                self.push_change(Change {
                    widget: widget_id,
                    write: PropertyWrite::Alpha(params.start_alpha),
                });
                (Segment::Main, TweenOp::FadeTo(params.end_alpha))
            }
            MotionKind::Spin => (
                Segment::Main,
                TweenOp::SpinAround {
                    axis: params.spin_axis.unit(),
                    degrees: params.spin_rate_deg * 60.0,
                },
            ),
            MotionKind::GroupFade => {
                if !policy.handles_group_fade() {
                    log::warn!(
                        "unsupported motion '{}' for {} widget {widget_id:?}; phase '{}' ignored",
                        params.kind.name(),
                        self.widgets[idx].kind.name(),
                        phase.name()
                    );
                    return;
                }
                self.push_change(Change {
                    widget: widget_id,
                    write: PropertyWrite::GroupAlpha(params.start_alpha),
                });
                (Segment::Main, TweenOp::GroupFadeTo(params.end_alpha))
            }
        };

        // intro segments always play once; the loop policy belongs to the
        // main segment
        let spec = TweenSpec {
            op,
            duration: params.duration,
            delay: params.delay,
            ease: params.ease,
            loop_mode: if segment == Segment::Intro {
                LoopMode::Once
            } else {
                loop_mode
            },
            ignore_time_scale: params.use_unscaled_time,
        };
        let tween = self.ids.alloc_tween();
        backend.submit(widget_id, tween, spec);
        self.widgets[idx].active = Some(ActiveMotion {
            phase,
            tween,
            segment,
            destroy_on_complete: params.destroy_on_complete,
        });
        self.push_event(CoreEvent::PhaseStarted {
            widget: widget_id,
            phase,
        });
    }

    /// React to a finished tween: advance the two-segment sub-machine, or run
    /// the completion policy for the final segment.
    fn handle_completion(&mut self, tween: TweenId, backend: &mut dyn TweenBackend) {
        let Some(idx) = self
            .widgets
            .iter()
            .position(|w| w.active.map(|a| a.tween) == Some(tween))
        else {
            // stale completion from a cancelled or superseded motion
            return;
        };
        let Some(active) = self.widgets[idx].active.take() else {
            return;
        };
        let widget_id = self.widgets[idx].id;

        match active.segment {
            Segment::Intro => {
                // second segment travels to the end value; parameters are
                // re-read so mid-flight edits take effect
                let Some(slot) = self.widgets[idx].phases.get(&active.phase) else {
                    return;
                };
                let params = slot.params.clone();
                let op = match params.kind {
                    MotionKind::Move => TweenOp::MoveTo(params.end_position),
                    MotionKind::Rotate => TweenOp::RotateTo(params.end_rotation),
                    _ => return,
                };
                let state = self.widgets[idx].state;
                let spec = TweenSpec {
                    op,
                    duration: params.duration,
                    delay: params.delay,
                    ease: params.ease,
                    loop_mode: if state.loops() {
                        params.loop_mode
                    } else {
                        LoopMode::Once
                    },
                    ignore_time_scale: params.use_unscaled_time,
                };
                let next = self.ids.alloc_tween();
                backend.submit(widget_id, next, spec);
                self.widgets[idx].active = Some(ActiveMotion {
                    segment: Segment::Main,
                    tween: next,
                    ..active
                });
            }
            Segment::Main => {
                self.push_event(CoreEvent::PhaseCompleted {
                    widget: widget_id,
                    phase: active.phase,
                });
                if active.destroy_on_complete {
                    self.widgets[idx].alive = false;
                    self.push_event(CoreEvent::DespawnRequested { widget: widget_id });
                    return;
                }
                let state = self.widgets[idx].state;
                let policy = policy_for(&self.widgets[idx].kind);
                match policy.follow_up(state, active.phase) {
                    FollowUp::EnterUpdate => {
                        self.run_lifecycle(idx, PlayState::Update, Phase::Update, backend);
                    }
                    FollowUp::None => {}
                }
            }
        }
    }

    fn push_change(&mut self, change: Change) {
        self.outputs.push_change(change);
    }

    fn push_event(&mut self, event: CoreEvent) {
        if self.outputs.events.len() >= self.cfg.max_events_per_tick {
            log::warn!("per-tick event cap reached; dropping {event:?}");
            return;
        }
        self.outputs.push_event(event);
    }
}
