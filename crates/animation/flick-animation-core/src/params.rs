//! Per-phase motion parameters.
//!
//! `MotionParams` is the value bundle a phase plays from; `PhaseSlot` is one
//! live, editable copy attached to a widget phase, with an optional provenance
//! link back to the preset it was loaded from. Field-exact equality on
//! `MotionParams` is what unsaved-change detection relies on, so every field
//! is value-typed and compared exactly (no tolerance).

use serde::{Deserialize, Serialize};

use crate::error::AnimError;
use crate::ids::PresetId;
use crate::tween::{Ease, LoopMode};

/// 3D vector for positions, scales, and euler-degree rotations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Which geometry fields of a parameter set are meaningful.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    #[default]
    Scale,
    Move,
    Rotate,
    Fade,
    Spin,
    /// Container-level opacity; only panel widgets handle it.
    GroupFade,
}

impl MotionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::Fade => "fade",
            Self::Spin => "spin",
            Self::GroupFade => "group-fade",
        }
    }
}

/// Axis selector for spin motions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinAxis {
    #[default]
    Forward,
    Backward,
    Up,
    Down,
    Right,
    Left,
}

impl SpinAxis {
    /// Resolve to a unit direction vector.
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Self::Forward => Vec3::new(0.0, 0.0, 1.0),
            Self::Backward => Vec3::new(0.0, 0.0, -1.0),
            Self::Up => Vec3::new(0.0, 1.0, 0.0),
            Self::Down => Vec3::new(0.0, -1.0, 0.0),
            Self::Right => Vec3::new(1.0, 0.0, 0.0),
            Self::Left => Vec3::new(-1.0, 0.0, 0.0),
        }
    }
}

/// One motion's full parameter set. Geometry fields are meaningful per `kind`;
/// the rest apply to every motion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub kind: MotionKind,
    /// Seconds before the motion starts.
    pub delay: f32,
    /// Seconds the motion (or each of its segments) runs.
    pub duration: f32,
    pub ease: Ease,
    /// Loop shape used while the widget idles in its update phase.
    pub loop_mode: LoopMode,
    /// Ask the host to dispose the widget once the motion finishes.
    pub destroy_on_complete: bool,
    /// Advance with real time, ignoring the host's global time scale.
    pub use_unscaled_time: bool,

    pub start_scale: Vec3,
    pub end_scale: Vec3,
    pub start_position: Vec3,
    pub end_position: Vec3,
    /// Euler degrees.
    pub start_rotation: Vec3,
    pub end_rotation: Vec3,

    pub start_alpha: f32,
    pub end_alpha: f32,

    pub spin_axis: SpinAxis,
    /// Degrees per second for spin motions.
    pub spin_rate_deg: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            kind: MotionKind::default(),
            delay: 0.0,
            duration: 0.0,
            ease: Ease::default(),
            loop_mode: LoopMode::PingPong,
            destroy_on_complete: false,
            use_unscaled_time: false,
            start_scale: Vec3::ONE,
            end_scale: Vec3::ONE,
            start_position: Vec3::ZERO,
            end_position: Vec3::ZERO,
            start_rotation: Vec3::ZERO,
            end_rotation: Vec3::ZERO,
            start_alpha: 0.0,
            end_alpha: 0.0,
            spin_axis: SpinAxis::default(),
            spin_rate_deg: 1.0,
        }
    }
}

impl MotionParams {
    /// Validate basic invariants (non-negative finite timing, finite geometry).
    pub fn validate_basic(&self) -> Result<(), AnimError> {
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(AnimError::InvalidParams {
                reason: format!("delay must be finite and >= 0, got {}", self.delay),
            });
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(AnimError::InvalidParams {
                reason: format!("duration must be finite and >= 0, got {}", self.duration),
            });
        }
        let geometry = [
            ("start_scale", &self.start_scale),
            ("end_scale", &self.end_scale),
            ("start_position", &self.start_position),
            ("end_position", &self.end_position),
            ("start_rotation", &self.start_rotation),
            ("end_rotation", &self.end_rotation),
        ];
        for (field, v) in geometry {
            if !v.is_finite() {
                return Err(AnimError::InvalidParams {
                    reason: format!("{field} must be finite"),
                });
            }
        }
        if !self.start_alpha.is_finite() || !self.end_alpha.is_finite() {
            return Err(AnimError::InvalidParams {
                reason: "alpha endpoints must be finite".into(),
            });
        }
        if !self.spin_rate_deg.is_finite() {
            return Err(AnimError::InvalidParams {
                reason: "spin_rate_deg must be finite".into(),
            });
        }
        Ok(())
    }
}

/// A live parameter set attached to one phase of one widget.
///
/// The `preset` link records where the fields came from; `None` means ad-hoc
/// parameters with no saved counterpart. The link never participates in field
/// equality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSlot {
    pub params: MotionParams,
    pub preset: Option<PresetId>,
}

impl PhaseSlot {
    pub fn new(params: MotionParams) -> Self {
        Self {
            params,
            preset: None,
        }
    }

    pub fn from_preset(id: PresetId, params: MotionParams) -> Self {
        Self {
            params,
            preset: Some(id),
        }
    }

    /// Copy every field from a preset's params and record the link.
    pub fn apply_preset(&mut self, id: PresetId, params: &MotionParams) {
        self.params = params.clone();
        self.preset = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_axis_units() {
        assert_eq!(SpinAxis::Forward.unit(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(SpinAxis::Backward.unit(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(SpinAxis::Up.unit(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(SpinAxis::Down.unit(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(SpinAxis::Right.unit(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(SpinAxis::Left.unit(), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn validate_rejects_negative_timing() {
        let mut p = MotionParams::default();
        assert!(p.validate_basic().is_ok());
        p.delay = -0.1;
        assert!(p.validate_basic().is_err());
        p.delay = 0.0;
        p.duration = f32::NAN;
        assert!(p.validate_basic().is_err());
    }

    #[test]
    fn preset_link_excluded_from_field_equality() {
        let a = PhaseSlot::new(MotionParams::default());
        let b = PhaseSlot::from_preset(PresetId(3), MotionParams::default());
        assert_eq!(a.params, b.params);
        assert_ne!(a, b);
    }
}
