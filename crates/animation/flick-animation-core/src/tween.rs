//! Tween backend contract.
//!
//! The core never interpolates anything itself: each phase is translated into
//! one or two `TweenSpec`s handed to a [`TweenBackend`], and completions come
//! back through a pull-based queue drained once per update. Easing curves and
//! loop shapes are opaque identifiers the backend interprets.

use serde::{Deserialize, Serialize};

use crate::ids::{TweenId, WidgetId};
use crate::params::Vec3;

/// Easing curve identifier, passed through to the backend uninterpreted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    BackOut,
    ElasticOut,
    BounceOut,
}

/// Loop shape applied to a tween. Parameter sets carry the shape to use while
/// a widget idles in its update phase; everywhere else motions play once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// What a single tween does to its widget.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TweenOp {
    ScaleTo(Vec3),
    MoveTo(Vec3),
    /// Local rotation as euler degrees.
    RotateTo(Vec3),
    FadeTo(f32),
    /// Container-level opacity, distinct from the widget's own alpha.
    GroupFadeTo(f32),
    /// Continuous rotation around a unit axis by a total number of degrees.
    SpinAround { axis: Vec3, degrees: f32 },
}

/// A fully-resolved tween request.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    pub op: TweenOp,
    /// Seconds, after `delay` has elapsed.
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
    pub loop_mode: LoopMode,
    /// Advance with real time rather than the host's scaled clock.
    pub ignore_time_scale: bool,
}

/// The external interpolation engine the core delegates to.
///
/// `submit` must start the tween asynchronously and return immediately; the
/// motion advances on the backend's own per-frame driver. `cancel_all` aborts
/// every in-flight tween for a widget synchronously — cancelled tweens must
/// never surface through `drain_completed`.
pub trait TweenBackend {
    fn submit(&mut self, widget: WidgetId, tween: TweenId, spec: TweenSpec);
    fn cancel_all(&mut self, widget: WidgetId);
    /// Move every tween finished since the last call into `out`.
    fn drain_completed(&mut self, out: &mut Vec<TweenId>);
}
