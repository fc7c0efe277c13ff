//! Kind-specific behavior hooks.
//!
//! Buttons and panels refine the base machine at three seams only: a reset
//! applied before a phase plays, the follow-up chosen when a motion completes,
//! and whether the kind handles group-level fades. Keeping these as a strategy
//! trait over unit structs lets each kind be tested without an engine.

use crate::phase::{Phase, PlayState, WidgetKind};

/// Transient spatial reset applied before a phase plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrePhase {
    None,
    /// Zero local rotation so repeated plays don't accumulate spin drift.
    ZeroRotation,
}

/// What the machine does after a motion's final segment completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FollowUp {
    None,
    /// Re-enter the update loop.
    EnterUpdate,
}

pub trait KindPolicy {
    fn before_phase(&self, _phase: Phase) -> PrePhase {
        PrePhase::None
    }

    fn follow_up(&self, state: PlayState, phase: Phase) -> FollowUp;

    fn handles_group_fade(&self) -> bool {
        false
    }
}

/// Start chains into the update loop; nothing else auto-chains.
pub struct BasePolicy;

impl KindPolicy for BasePolicy {
    fn follow_up(&self, state: PlayState, _phase: Phase) -> FollowUp {
        match state {
            PlayState::Start => FollowUp::EnterUpdate,
            _ => FollowUp::None,
        }
    }
}

/// Buttons additionally chain unhover back into the update loop, so an idle
/// widget resumes its idle motion after the pointer leaves, and reset rotation
/// before hover phases.
pub struct ButtonPolicy;

impl KindPolicy for ButtonPolicy {
    fn before_phase(&self, phase: Phase) -> PrePhase {
        match phase {
            Phase::Hover | Phase::DisabledHover => PrePhase::ZeroRotation,
            _ => PrePhase::None,
        }
    }

    fn follow_up(&self, state: PlayState, phase: Phase) -> FollowUp {
        if phase == Phase::Unhover {
            return FollowUp::EnterUpdate;
        }
        BasePolicy.follow_up(state, phase)
    }
}

/// Panels follow the base chain rule and own the group-fade motion.
pub struct PanelPolicy;

impl KindPolicy for PanelPolicy {
    fn follow_up(&self, state: PlayState, phase: Phase) -> FollowUp {
        BasePolicy.follow_up(state, phase)
    }

    fn handles_group_fade(&self) -> bool {
        true
    }
}

pub fn policy_for(kind: &WidgetKind) -> &'static dyn KindPolicy {
    match kind {
        WidgetKind::Base => &BasePolicy,
        WidgetKind::Button { .. } => &ButtonPolicy,
        WidgetKind::Panel => &PanelPolicy,
    }
}
