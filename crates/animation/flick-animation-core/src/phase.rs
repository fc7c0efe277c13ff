//! Named animation phases, the per-widget play state, and widget kinds.

use serde::{Deserialize, Serialize};

/// A named animation slot. Each widget kind supports a subset; see
/// [`WidgetKind::supports`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Start,
    Update,
    End,
    Click,
    Hover,
    Unhover,
    Select,
    Unselect,
    DisabledHover,
    DisabledClick,
    Open,
    Close,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Update => "update",
            Self::End => "end",
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Unhover => "unhover",
            Self::Select => "select",
            Self::Unselect => "unselect",
            Self::DisabledHover => "disabled-hover",
            Self::DisabledClick => "disabled-click",
            Self::Open => "open",
            Self::Close => "close",
        }
    }

    /// Interaction-triggered phases override in-flight motion and never
    /// auto-chain on completion.
    #[inline]
    pub fn is_interaction(&self) -> bool {
        !matches!(self, Self::Start | Self::Update | Self::End)
    }
}

/// Which phase's motion is in flight, or was last completed normally.
/// `ForcePlay` marks an interaction-triggered phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Start,
    Update,
    End,
    ForcePlay,
}

impl PlayState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Update => "update",
            Self::End => "end",
            Self::ForcePlay => "force-play",
        }
    }

    /// Loop shapes only apply while a widget idles in its update phase.
    #[inline]
    pub fn loops(&self) -> bool {
        matches!(self, Self::Update)
    }
}

/// Closed set of animated widget kinds; each carries its own phase vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetKind {
    Base,
    Button { interactable: bool },
    Panel,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Button { .. } => "button",
            Self::Panel => "panel",
        }
    }

    /// Whether this kind owns a slot for the given phase.
    pub fn supports(&self, phase: Phase) -> bool {
        match self {
            Self::Base => matches!(phase, Phase::Start | Phase::Update | Phase::End),
            Self::Button { .. } => !matches!(phase, Phase::Open | Phase::Close),
            Self::Panel => matches!(
                phase,
                Phase::Start | Phase::Update | Phase::End | Phase::Open | Phase::Close
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_phases() {
        assert!(!Phase::Start.is_interaction());
        assert!(!Phase::Update.is_interaction());
        assert!(!Phase::End.is_interaction());
        for p in [
            Phase::Click,
            Phase::Hover,
            Phase::Unhover,
            Phase::Select,
            Phase::Unselect,
            Phase::DisabledHover,
            Phase::DisabledClick,
            Phase::Open,
            Phase::Close,
        ] {
            assert!(p.is_interaction(), "{} should be an interaction", p.name());
        }
    }

    #[test]
    fn kind_phase_vocabulary() {
        let base = WidgetKind::Base;
        let button = WidgetKind::Button { interactable: true };
        let panel = WidgetKind::Panel;

        assert!(base.supports(Phase::Start));
        assert!(!base.supports(Phase::Click));
        assert!(!base.supports(Phase::Open));

        assert!(button.supports(Phase::Click));
        assert!(button.supports(Phase::DisabledHover));
        assert!(!button.supports(Phase::Open));

        assert!(panel.supports(Phase::Open));
        assert!(panel.supports(Phase::Close));
        assert!(!panel.supports(Phase::Hover));
    }

    #[test]
    fn only_update_state_loops() {
        assert!(PlayState::Update.loops());
        assert!(!PlayState::Start.loops());
        assert!(!PlayState::End.loops());
        assert!(!PlayState::ForcePlay.loops());
    }
}
